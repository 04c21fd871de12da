//! Pagesmith Artifact
//!
//! Storage for rendered pages and run reports. Documents are JSON values
//! addressed by key (`faq.json`, `workflow_report.json`, ...).
//!
//! The [`Store`] trait is the backend seam. [`FsStore`] writes each document
//! to `{base_path}/{key}`.

mod fs;
mod validate;

pub use fs::FsStore;
pub use validate::{
  FileCheck, MIN_FAQ_QUESTIONS, PAGE_FILES, REPORT_FILE, ValidationReport, remove_stale_pages,
  validate_outputs,
};

use async_trait::async_trait;
use serde_json::Value;

/// Error type for document storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The requested document was not found.
  #[error("document not found: {0}")]
  NotFound(String),

  /// The stored document is not valid JSON.
  #[error("document '{key}' is not valid JSON: {source}")]
  InvalidJson {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// JSON document storage.
#[async_trait]
pub trait Store: Send + Sync {
  /// Retrieve and parse a document.
  async fn get(&self, key: &str) -> Result<Value, Error>;

  /// Store a document, replacing any existing one.
  async fn put(&self, key: &str, document: &Value) -> Result<(), Error>;

  async fn exists(&self, key: &str) -> Result<bool, Error>;

  /// Delete a document by key.
  async fn delete(&self, key: &str) -> Result<(), Error>;
}
