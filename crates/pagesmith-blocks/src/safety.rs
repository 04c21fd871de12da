use pagesmith_product::ProductData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::ContentBlock;
use crate::error::BlockError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyContent {
  pub side_effects: String,
  pub warnings: Vec<String>,
  pub recommendations: Vec<String>,
  pub patch_test: bool,
  pub discontinue_if: String,
  pub consult_doctor: String,
}

/// Derives warnings and recommendations from side effects and skin types.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyBlock;

impl SafetyBlock {
  pub fn content(&self, product: &ProductData) -> SafetyContent {
    let side_effects = product.side_effects.to_lowercase();
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    if side_effects.contains("tingling") {
      warnings.push("Mild tingling may occur initially".to_string());
      recommendations.push("Start with patch test".to_string());
    }
    if side_effects.contains("sensitive") {
      warnings.push("Extra caution for sensitive skin".to_string());
      recommendations.push("Use every other day at first".to_string());
    }

    let has_skin_type = |t: &str| product.skin_type.iter().any(|s| s == t);
    if has_skin_type("Oily") {
      recommendations.push("Suitable for oily skin - non-comedogenic".to_string());
    }
    if has_skin_type("Combination") {
      recommendations.push("Balances both oily and dry areas".to_string());
    }

    SafetyContent {
      side_effects: product.side_effects.clone(),
      warnings,
      recommendations,
      patch_test: true,
      discontinue_if: "Severe irritation occurs".to_string(),
      consult_doctor: "If you have very sensitive skin or conditions".to_string(),
    }
  }
}

impl ContentBlock for SafetyBlock {
  fn name(&self) -> &'static str {
    "safety-warning-block"
  }

  fn description(&self) -> &'static str {
    "Formats safety information and warnings"
  }

  fn apply(&self, product: &ProductData) -> Result<Value, BlockError> {
    Ok(serde_json::to_value(self.content(product))?)
  }
}
