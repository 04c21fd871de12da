use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
  /// The template data lacks fields the template requires.
  #[error("template '{template}' is missing required fields: {}", fields.join(", "))]
  MissingFields { template: String, fields: Vec<String> },

  /// No template is registered under this name.
  #[error("template '{name}' not found")]
  UnknownTemplate { name: String },

  /// A field is present but has the wrong shape.
  #[error("template '{template}' cannot read field '{field}': {source}")]
  InvalidField {
    template: String,
    field: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to render template '{template}': {source}")]
  Render {
    template: String,
    #[source]
    source: minijinja::Error,
  },

  #[error("failed to serialize page: {0}")]
  Serialization(#[from] serde_json::Error),
}
