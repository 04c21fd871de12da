use pagesmith_blocks::ContentBlocks;
use serde_json::{Value, json};

use crate::data::{ProductInfo, TemplateData};
use crate::error::TemplateError;
use crate::page::{PageTemplate, read_field};

/// Full product description page with specifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductPageTemplate;

impl PageTemplate for ProductPageTemplate {
  fn name(&self) -> &'static str {
    "product_page"
  }

  fn description(&self) -> &'static str {
    "Complete product description page with specifications"
  }

  fn required_fields(&self) -> &'static [&'static str] {
    &["product_info", "content_blocks"]
  }

  fn content(&self, data: &TemplateData) -> Result<Value, TemplateError> {
    let product: ProductInfo = read_field(self.name(), data, "product_info")?;
    let blocks = ContentBlocks::from_value(data.content_blocks.as_ref().unwrap_or(&Value::Null));

    let benefits = blocks.benefits.unwrap_or_default();
    let ingredients = blocks.ingredients.unwrap_or_default();
    let usage = blocks.usage.unwrap_or_default();
    let safety = blocks.safety;
    let price = blocks.price.unwrap_or_default();
    let skin_types = product.skin_type.join(", ");

    let key_benefits = if benefits.primary_benefits.is_empty() {
      "multiple benefits".to_string()
    } else {
      benefits.primary_benefits.join(", ")
    };
    let description = format!(
      "{} is a {} serum featuring {} key active ingredients. \
       Formulated for {} skin types, it delivers {}. \
       Perfect for daily use in your morning skincare routine.",
      product.name, product.concentration, ingredients.total_actives, skin_types, key_benefits
    );

    let key_ingredients: Vec<Value> = ingredients
      .ingredients
      .iter()
      .map(|i| json!({ "name": i.name, "benefit": i.benefit, "purpose": i.purpose }))
      .collect();

    Ok(json!({
      "header": {
        "title": product.name,
        "tagline": format!("Advanced {} Serum", product.concentration),
        "short_description": format!("A premium serum designed for {} skin", skin_types),
      },
      "overview": {
        "description": description,
        "key_benefits": benefits.primary_benefits,
        "ideal_for": product.skin_type,
      },
      "specifications": {
        "concentration": product.concentration,
        "key_ingredients": key_ingredients,
        "texture": "Lightweight, fast-absorbing",
        "fragrance": "Unscented",
        "size": "30ml",
      },
      "usage": {
        "instructions": usage.steps,
        "frequency": non_empty_or(&usage.frequency, "Daily"),
        "best_time": non_empty_or(&usage.best_time, "Morning"),
      },
      "safety": {
        "warnings": safety.as_ref().map(|s| s.warnings.clone()).unwrap_or_default(),
        "recommendations": safety.as_ref().map(|s| s.recommendations.clone()).unwrap_or_default(),
        "patch_test": safety.as_ref().is_none_or(|s| s.patch_test),
      },
      "pricing": {
        "price": price.display_price,
        "value": price.value_rating,
        "category": price.price_category,
      },
      "metadata": {
        "sku": format!("SKU-{}", product.name.replace(' ', "-").to_uppercase()),
        "category": "Face Serums",
        "rating": "4.5/5",
        "reviews_count": "150+",
      },
    }))
  }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
  if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::sample_data;

  #[test]
  fn test_renders_sample_page() {
    let page = ProductPageTemplate.render(&sample_data()).unwrap();
    let content = &page["content"];

    assert_eq!(page["page_type"], "product_page");
    assert_eq!(content["header"]["title"], "GlowBoost Vitamin C Serum");
    assert_eq!(content["header"]["tagline"], "Advanced 10% Vitamin C Serum");
    assert_eq!(content["metadata"]["sku"], "SKU-GLOWBOOST-VITAMIN-C-SERUM");
    assert_eq!(content["specifications"]["size"], "30ml");
    assert_eq!(content["specifications"]["key_ingredients"][0]["name"], "Vitamin C");
    assert_eq!(content["pricing"]["category"], "Mid-range");
    assert_eq!(content["usage"]["instructions"].as_array().unwrap().len(), 3);
    assert_eq!(content["safety"]["patch_test"], true);
  }

  #[test]
  fn test_description_mentions_actives_and_benefits() {
    let page = ProductPageTemplate.render(&sample_data()).unwrap();
    let description = page["content"]["overview"]["description"].as_str().unwrap();

    assert!(description.starts_with(
      "GlowBoost Vitamin C Serum is a 10% Vitamin C serum featuring 2 key active ingredients."
    ));
    assert!(description.contains("Formulated for Oily, Combination skin types"));
    assert!(description.contains("Enhances skin radiance and glow"));
  }

  #[test]
  fn test_requires_content_blocks() {
    let mut data = sample_data();
    data.content_blocks = None;

    let err = ProductPageTemplate.render(&data).unwrap_err();
    assert!(matches!(err, TemplateError::MissingFields { .. }));
  }
}
