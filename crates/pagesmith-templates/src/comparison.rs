//! Comparison page against a fixed reference product.

use pagesmith_blocks::{ContentBlocks, numeric_price};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::data::{ProductInfo, TemplateData};
use crate::error::TemplateError;
use crate::page::{PageTemplate, read_field};

/// The product the page compares against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProduct {
  pub name: String,
  pub ingredients: Vec<String>,
  pub benefits: Vec<String>,
  pub price: String,
  pub concentration: String,
  pub skin_type: Vec<String>,
  pub key_feature: String,
}

impl ReferenceProduct {
  /// A fictional serum used for demonstration comparisons.
  pub fn dermaglow() -> Self {
    fn strings(items: &[&str]) -> Vec<String> {
      items.iter().map(|s| s.to_string()).collect()
    }

    Self {
      name: "DermaGlow Vitamin E Serum".to_string(),
      ingredients: strings(&["Vitamin E", "Niacinamide", "Green Tea Extract"]),
      benefits: strings(&["Hydration", "Reduces Redness", "Antioxidant Protection"]),
      price: "₹899".to_string(),
      concentration: "5% Vitamin E".to_string(),
      skin_type: strings(&["All", "Sensitive", "Dry"]),
      key_feature: "Gentle formula for sensitive skin".to_string(),
    }
  }
}

/// Product A (ours) against a reference product B.
#[derive(Debug, Clone)]
pub struct ComparisonTemplate {
  reference: ReferenceProduct,
}

impl ComparisonTemplate {
  pub fn new() -> Self {
    Self::with_reference(ReferenceProduct::dermaglow())
  }

  pub fn with_reference(reference: ReferenceProduct) -> Self {
    Self { reference }
  }

  pub fn reference(&self) -> &ReferenceProduct {
    &self.reference
  }
}

impl Default for ComparisonTemplate {
  fn default() -> Self {
    Self::new()
  }
}

impl PageTemplate for ComparisonTemplate {
  fn name(&self) -> &'static str {
    "comparison_page"
  }

  fn description(&self) -> &'static str {
    "Product comparison page (Product A vs Product B)"
  }

  fn required_fields(&self) -> &'static [&'static str] {
    &["product_a", "content_blocks"]
  }

  fn content(&self, data: &TemplateData) -> Result<Value, TemplateError> {
    let a: ProductInfo = read_field(self.name(), data, "product_a")?;
    let blocks = ContentBlocks::from_value(data.content_blocks.as_ref().unwrap_or(&Value::Null));
    let b = &self.reference;

    let price = blocks.price.unwrap_or_default();
    let ingredients: Vec<String> = blocks
      .ingredients
      .unwrap_or_default()
      .ingredients
      .into_iter()
      .map(|i| i.name)
      .collect();
    let primary_benefits = blocks.benefits.unwrap_or_default().primary_benefits;

    let price_a = numeric_price(&price.display_price).unwrap_or(0);
    let price_b = numeric_price(&b.price).unwrap_or(0);

    let price_winner = if price_b < price_a { "B" } else { "A" };
    let ingredients_winner = if ingredients.len() > b.ingredients.len() { "A" } else { "B" };

    let recommendation = if price_a < price_b {
      format!(
        "For budget-conscious buyers looking for effective Vitamin C, {} offers better value.",
        a.name
      )
    } else {
      format!(
        "For sensitive skin or those wanting Vitamin E benefits, {} might be preferable \
         despite higher cost.",
        b.name
      )
    };

    Ok(json!({
      "title": format!("Comparison: {} vs {}", a.name, b.name),
      "summary": "Comparing two popular vitamin C serums for different needs",
      "products": [
        {
          "name": a.name,
          "label": "Our Product",
          "price": price.display_price,
          "key_ingredients": ingredients,
          "benefits": primary_benefits,
          "best_for": a.skin_type,
          "concentration": a.concentration,
          "value_rating": price.value_rating,
          "pros": [
            "Higher Vitamin C concentration",
            "Multiple brightening benefits",
            "Competitive pricing",
          ],
          "cons": [
            "May cause tingling for very sensitive skin",
            "Specific to oily/combination skin",
          ],
        },
        {
          "name": b.name,
          "label": "Alternative",
          "price": b.price,
          "key_ingredients": b.ingredients,
          "benefits": b.benefits,
          "best_for": b.skin_type,
          "concentration": b.concentration,
          "value_rating": "Premium",
          "pros": [
            "Gentle formula",
            "Suitable for all skin types",
            "Additional antioxidant Vitamin E",
          ],
          "cons": ["Higher price point", "Lower active concentration"],
        },
      ],
      "key_differences": [
        {
          "aspect": "Price",
          "product_a": price.display_price,
          "product_b": b.price,
          "winner": price_winner,
        },
        {
          "aspect": "Key Ingredients",
          "product_a": format!("{} actives", ingredients.len()),
          "product_b": format!("{} key ingredients", b.ingredients.len()),
          "winner": ingredients_winner,
        },
        {
          "aspect": "Best For",
          "product_a": a.skin_type.join(", "),
          "product_b": "All skin types, especially sensitive",
          "winner": "Depends on skin type",
        },
      ],
      "recommendation": recommendation,
      "disclaimer": "Product B is fictional for demonstration. Always patch test new products.",
    }))
  }
}
