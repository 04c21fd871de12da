use pagesmith_product::ProductData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::ContentBlock;
use crate::error::BlockError;

/// Keyword in the instructions -> step it implies.
const STEP_KEYWORDS: &[(&str, &str)] = &[
  ("drops", "Take 2-3 drops of serum"),
  ("morning", "Use in the morning routine"),
  ("sunscreen", "Apply before sunscreen for protection"),
];

const DEFAULT_STEPS: &[&str] = &["Apply to clean face", "Use daily for best results"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageContent {
  pub main_instruction: String,
  pub steps: Vec<String>,
  pub frequency: String,
  pub best_time: String,
  pub key_tip: String,
}

/// Breaks usage instructions into structured steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageBlock;

impl UsageBlock {
  pub fn content(&self, product: &ProductData) -> UsageContent {
    let text = product.how_to_use.to_lowercase();

    let mut steps: Vec<String> = STEP_KEYWORDS
      .iter()
      .filter(|(keyword, _)| text.contains(keyword))
      .map(|(_, step)| step.to_string())
      .collect();
    if steps.is_empty() {
      steps = DEFAULT_STEPS.iter().map(|s| s.to_string()).collect();
    }

    UsageContent {
      main_instruction: product.how_to_use.clone(),
      steps,
      frequency: "Daily".to_string(),
      best_time: "Morning".to_string(),
      key_tip: "Apply to damp skin for better absorption".to_string(),
    }
  }
}

impl ContentBlock for UsageBlock {
  fn name(&self) -> &'static str {
    "extract-usage-block"
  }

  fn description(&self) -> &'static str {
    "Formats usage instructions into structured steps"
  }

  fn apply(&self, product: &ProductData) -> Result<Value, BlockError> {
    Ok(serde_json::to_value(self.content(product))?)
  }
}
