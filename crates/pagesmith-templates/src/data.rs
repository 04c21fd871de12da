use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The product fields pages display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
  pub name: String,
  #[serde(default)]
  pub concentration: String,
  #[serde(default)]
  pub skin_type: Vec<String>,
  #[serde(default)]
  pub price: String,
}

/// Input to a page template. Each template declares which fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateData {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product_info: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product_a: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub questions: Option<Value>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub content_blocks: Option<Value>,
}

impl TemplateData {
  /// Assemble template data from stage outputs.
  ///
  /// `product` is a parsed product; its display fields become both
  /// `product_info` and `product_a`. Absent parts leave their fields unset.
  pub fn from_values(
    product: Option<&Value>,
    questions: Option<Value>,
    content_blocks: Option<Value>,
  ) -> Result<Self, serde_json::Error> {
    let info = product
      .map(|p| ProductInfo::deserialize(p).and_then(serde_json::to_value))
      .transpose()?;

    Ok(Self {
      product_a: info.clone(),
      product_info: info,
      questions,
      content_blocks,
    })
  }

  /// Look up a field by its serialized name.
  pub fn field(&self, name: &str) -> Option<&Value> {
    match name {
      "product_info" => self.product_info.as_ref(),
      "product_a" => self.product_a.as_ref(),
      "questions" => self.questions.as_ref(),
      "content_blocks" => self.content_blocks.as_ref(),
      _ => None,
    }
  }

  pub fn has(&self, name: &str) -> bool {
    self.field(name).is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_product_fields_are_projected() {
    let product = json!({
      "name": "Serum",
      "concentration": "5%",
      "skin_type": ["Dry"],
      "price": "₹100",
      "benefits": ["Glow"],
    });

    let data = TemplateData::from_values(Some(&product), None, None).unwrap();

    let info = data.product_info.as_ref().unwrap();
    assert_eq!(info["name"], "Serum");
    assert!(info.get("benefits").is_none());
    assert_eq!(data.product_a, data.product_info);
    assert!(!data.has("questions"));
  }

  #[test]
  fn test_product_without_name_is_rejected() {
    let err = TemplateData::from_values(Some(&json!({"price": "₹1"})), None, None);
    assert!(err.is_err());
  }

  #[test]
  fn test_unset_fields_are_not_serialized() {
    let value = serde_json::to_value(TemplateData::default()).unwrap();
    assert_eq!(value, json!({}));
  }
}
