use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::data::TemplateData;
use crate::error::TemplateError;

/// Version stamped into every page envelope.
pub const TEMPLATE_VERSION: &str = "1.0";

/// A page template.
///
/// Implementors build the page body in [`PageTemplate::content`]. The
/// provided [`PageTemplate::render`] checks required fields first and wraps
/// the body in the metadata envelope.
pub trait PageTemplate {
  /// Page type, also used as the template's registry name.
  fn name(&self) -> &'static str;

  fn description(&self) -> &'static str;

  /// Fields of [`TemplateData`] that must be present.
  fn required_fields(&self) -> &'static [&'static str];

  /// Build the page body. Required fields are guaranteed present.
  fn content(&self, data: &TemplateData) -> Result<Value, TemplateError>;

  fn render(&self, data: &TemplateData) -> Result<Value, TemplateError> {
    let missing: Vec<String> = self
      .required_fields()
      .iter()
      .filter(|f| !data.has(f))
      .map(|f| f.to_string())
      .collect();
    if !missing.is_empty() {
      return Err(TemplateError::MissingFields {
        template: self.name().to_string(),
        fields: missing,
      });
    }

    let content = self.content(data)?;
    debug!(template = self.name(), "page_rendered");

    Ok(json!({
      "page_type": self.name(),
      "generated_at": Utc::now().to_rfc3339(),
      "template_version": TEMPLATE_VERSION,
      "content": content,
    }))
  }
}

/// Deserialize a required field of `data` for `template`.
pub(crate) fn read_field<T: DeserializeOwned>(
  template: &str,
  data: &TemplateData,
  field: &str,
) -> Result<T, TemplateError> {
  let value = data.field(field).cloned().unwrap_or(Value::Null);
  serde_json::from_value(value).map_err(|source| TemplateError::InvalidField {
    template: template.to_string(),
    field: field.to_string(),
    source,
  })
}
