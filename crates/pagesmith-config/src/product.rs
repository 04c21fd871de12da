use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A product record as supplied by the user: display label to raw text.
///
/// Labels are kept verbatim (`"Product Name"`, `"Skin Type"`, ...). Turning
/// them into typed fields is the parser's job, not the config layer's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(BTreeMap<String, String>);

impl RawProduct {
  /// Labels understood by the product parser, in display order.
  pub const LABELS: [&'static str; 8] = [
    "Product Name",
    "Concentration",
    "Skin Type",
    "Key Ingredients",
    "Benefits",
    "How to Use",
    "Side Effects",
    "Price",
  ];

  pub fn new() -> Self {
    Self::default()
  }

  /// The built-in sample record used when no product file is given.
  pub fn sample() -> Self {
    [
      ("Product Name", "GlowBoost Vitamin C Serum"),
      ("Concentration", "10% Vitamin C"),
      ("Skin Type", "Oily, Combination"),
      ("Key Ingredients", "Vitamin C, Hyaluronic Acid"),
      ("Benefits", "Brightening, Fades dark spots"),
      ("How to Use", "Apply 2–3 drops in the morning before sunscreen"),
      ("Side Effects", "Mild tingling for sensitive skin"),
      ("Price", "₹699"),
    ]
    .into_iter()
    .collect()
  }

  /// Load a record from a JSON object file.
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

  pub fn get(&self, label: &str) -> Option<&str> {
    self.0.get(label).map(String::as_str)
  }

  pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
    self.0.insert(label.into(), value.into());
  }

  pub fn remove(&mut self, label: &str) -> Option<String> {
    self.0.remove(label)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// The record as a JSON object, ready to seed a workflow run.
  pub fn to_value(&self) -> serde_json::Value {
    serde_json::Value::Object(
      self
        .0
        .iter()
        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
        .collect(),
    )
  }
}

impl<K, V> FromIterator<(K, V)> for RawProduct
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
