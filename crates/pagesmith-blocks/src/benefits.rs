use pagesmith_product::ProductData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::ContentBlock;
use crate::error::BlockError;

/// Benefits that get turned into marketing copy. Anything else passes through.
const EXPANSIONS: &[(&str, &[&str])] = &[
  (
    "Brightening",
    &["Enhances skin radiance and glow", "Reduces dullness for luminous skin"],
  ),
  (
    "Fades dark spots",
    &["Reduces appearance of hyperpigmentation", "Helps fade dark spots over time"],
  ),
];

const PRIMARY_COUNT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitsContent {
  pub primary_benefits: Vec<String>,
  pub secondary_benefits: Vec<String>,
  pub total_benefits: usize,
  pub key_benefit: String,
}

/// Expands terse benefit labels into marketing copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenefitsBlock;

impl BenefitsBlock {
  pub fn content(&self, product: &ProductData) -> BenefitsContent {
    let expanded: Vec<String> = product
      .benefits
      .iter()
      .flat_map(|benefit| match EXPANSIONS.iter().find(|(label, _)| *label == benefit.as_str()) {
        Some((_, copy)) => copy.iter().map(|c| c.to_string()).collect(),
        None => vec![benefit.clone()],
      })
      .collect();

    let split = expanded.len().min(PRIMARY_COUNT);
    BenefitsContent {
      primary_benefits: expanded[..split].to_vec(),
      secondary_benefits: expanded[split..].to_vec(),
      total_benefits: expanded.len(),
      key_benefit: expanded.first().cloned().unwrap_or_default(),
    }
  }
}

impl ContentBlock for BenefitsBlock {
  fn name(&self) -> &'static str {
    "generate-benefits-block"
  }

  fn description(&self) -> &'static str {
    "Transforms benefits data into marketing copy"
  }

  fn apply(&self, product: &ProductData) -> Result<Value, BlockError> {
    Ok(serde_json::to_value(self.content(product))?)
  }
}
