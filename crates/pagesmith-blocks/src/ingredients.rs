use pagesmith_product::ProductData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::ContentBlock;
use crate::error::BlockError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientDetail {
  pub name: String,
  pub benefit: String,
  pub purpose: String,
  pub key_feature: String,
}

impl IngredientDetail {
  fn known(name: &str) -> Option<Self> {
    let (benefit, purpose, key_feature) = match name {
      "Vitamin C" => (
        "Powerful antioxidant that brightens skin",
        "Fights free radicals, boosts collagen",
        "10% concentration for optimal efficacy",
      ),
      "Hyaluronic Acid" => (
        "Intense hydration without heaviness",
        "Locks in moisture, plumps skin",
        "Holds 1000x its weight in water",
      ),
      _ => return None,
    };
    Some(Self {
      name: name.to_string(),
      benefit: benefit.to_string(),
      purpose: purpose.to_string(),
      key_feature: key_feature.to_string(),
    })
  }

  fn generic(name: &str) -> Self {
    Self {
      name: name.to_string(),
      benefit: "Provides skincare benefits".to_string(),
      purpose: "Key active ingredient".to_string(),
      key_feature: "Essential component".to_string(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientsContent {
  pub ingredients: Vec<IngredientDetail>,
  pub total_actives: usize,
  pub key_ingredient: String,
  pub concentration: String,
}

/// Explains each key ingredient.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientsBlock;

impl IngredientsBlock {
  pub fn content(&self, product: &ProductData) -> IngredientsContent {
    let ingredients: Vec<IngredientDetail> = product
      .key_ingredients
      .iter()
      .map(|name| IngredientDetail::known(name).unwrap_or_else(|| IngredientDetail::generic(name)))
      .collect();

    IngredientsContent {
      total_actives: ingredients.len(),
      key_ingredient: ingredients.first().map(|i| i.name.clone()).unwrap_or_default(),
      concentration: product.concentration.clone(),
      ingredients,
    }
  }
}

impl ContentBlock for IngredientsBlock {
  fn name(&self) -> &'static str {
    "analyze-ingredients-block"
  }

  fn description(&self) -> &'static str {
    "Analyzes and explains key ingredients"
  }

  fn apply(&self, product: &ProductData) -> Result<Value, BlockError> {
    Ok(serde_json::to_value(self.content(product))?)
  }
}
