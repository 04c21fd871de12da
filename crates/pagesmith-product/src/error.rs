use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
  /// The raw record lacks a label the model requires.
  #[error("missing product field '{label}'")]
  MissingField { label: String },

  /// A question template failed to render.
  #[error("failed to render question template: {0}")]
  Template(#[from] minijinja::Error),
}
