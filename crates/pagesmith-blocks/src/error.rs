use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockError {
  /// The product lacks data the block needs.
  #[error("block '{block}' cannot use product data: {message}")]
  InvalidProduct { block: String, message: String },

  #[error("failed to serialize block output: {0}")]
  Serialization(#[from] serde_json::Error),
}
