use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::product::RawProduct;

/// Directory pages are written to when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV: &str = "PAGESMITH_OUTPUT_DIR";

/// Settings for one pagesmith run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Where rendered pages and the workflow report are written.
  pub output_dir: PathBuf,
  /// The product record to render pages for.
  pub product: RawProduct,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
      product: RawProduct::sample(),
    }
  }
}

impl AppConfig {
  /// Build the configuration from defaults, an optional JSON file and the
  /// process environment.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    let config = match path {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    Ok(config.apply_env_from(|key| std::env::var(key).ok()))
  }

  /// Read a JSON config file. Absent fields keep their defaults.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Apply environment overrides using `lookup` to read variables.
  pub fn apply_env_from<F>(mut self, lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|d| !d.is_empty()) {
      self.output_dir = PathBuf::from(dir);
    }
    self
  }
}
