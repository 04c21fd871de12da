use pagesmith_product::ProductData;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::benefits::BenefitsBlock;
use crate::block::ContentBlock;
use crate::ingredients::IngredientsBlock;
use crate::price::PriceBlock;
use crate::safety::SafetyBlock;
use crate::usage::UsageBlock;

/// Describes a registered block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
  /// Key the block's output is stored under.
  pub key: String,
  pub name: String,
  pub description: String,
}

/// Applies content blocks to a product.
///
/// Blocks are kept in registration order, keyed by the name their output is
/// stored under (`benefits`, `usage`, ...).
pub struct BlockManager {
  blocks: Vec<(String, Box<dyn ContentBlock>)>,
}

impl BlockManager {
  /// A manager with no blocks.
  pub fn empty() -> Self {
    Self { blocks: Vec::new() }
  }

  /// A manager with the five standard blocks.
  pub fn new() -> Self {
    let mut manager = Self::empty();
    manager.register("benefits", BenefitsBlock);
    manager.register("usage", UsageBlock);
    manager.register("ingredients", IngredientsBlock);
    manager.register("safety", SafetyBlock);
    manager.register("price", PriceBlock);
    manager
  }

  /// Register a block under `key`, replacing any block already there.
  pub fn register(&mut self, key: impl Into<String>, block: impl ContentBlock + 'static) {
    let key = key.into();
    let block: Box<dyn ContentBlock> = Box::new(block);
    match self.blocks.iter_mut().find(|(k, _)| *k == key) {
      Some(slot) => slot.1 = block,
      None => self.blocks.push((key, block)),
    }
  }

  /// Apply the named blocks, or every block when `keys` is `None`.
  ///
  /// Unknown keys are ignored. A block that fails is recorded as
  /// `{"error": message}` under its key; the remaining blocks still run.
  pub fn apply(&self, product: &ProductData, keys: Option<&[&str]>) -> Map<String, Value> {
    let mut results = Map::new();

    for (key, block) in &self.blocks {
      if keys.is_some_and(|keys| !keys.contains(&key.as_str())) {
        continue;
      }

      match block.apply(product) {
        Ok(output) => {
          debug!(block = block.name(), "block_applied");
          results.insert(key.clone(), output);
        }
        Err(e) => {
          warn!(block = block.name(), error = %e, "block_failed");
          results.insert(key.clone(), json!({ "error": e.to_string() }));
        }
      }
    }

    if let Some(keys) = keys {
      for key in keys.iter().filter(|k| !self.contains(k)) {
        debug!(block = %key, "block_unknown");
      }
    }

    info!(applied = results.len(), "blocks_applied");
    results
  }

  pub fn contains(&self, key: &str) -> bool {
    self.blocks.iter().any(|(k, _)| k == key)
  }

  /// Registered blocks, in registration order.
  pub fn available(&self) -> Vec<BlockInfo> {
    self
      .blocks
      .iter()
      .map(|(key, block)| BlockInfo {
        key: key.clone(),
        name: block.name().to_string(),
        description: block.description().to_string(),
      })
      .collect()
  }
}

impl Default for BlockManager {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::BlockError;
  use crate::testing::sample;

  struct Broken;

  impl ContentBlock for Broken {
    fn name(&self) -> &'static str {
      "broken-block"
    }

    fn description(&self) -> &'static str {
      "Always fails"
    }

    fn apply(&self, _product: &ProductData) -> Result<Value, BlockError> {
      Err(BlockError::InvalidProduct {
        block: "broken-block".to_string(),
        message: "nope".to_string(),
      })
    }
  }

  #[test]
  fn test_applies_all_blocks_by_default() {
    let results = BlockManager::new().apply(&sample(), None);

    let keys: Vec<&str> = results.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 5);
    for key in ["benefits", "usage", "ingredients", "safety", "price"] {
      assert!(results.contains_key(key), "missing {key}");
    }
    assert_eq!(results["price"]["numeric_value"], 699);
  }

  #[test]
  fn test_applies_selected_blocks_and_ignores_unknown() {
    let results = BlockManager::new().apply(&sample(), Some(&["usage", "nonexistent"]));

    assert_eq!(results.len(), 1);
    assert!(results.contains_key("usage"));
  }

  #[test]
  fn test_failing_block_is_recorded_and_others_run() {
    let mut manager = BlockManager::new();
    manager.register("broken", Broken);

    let results = manager.apply(&sample(), None);

    assert_eq!(results.len(), 6);
    assert_eq!(
      results["broken"]["error"],
      "block 'broken-block' cannot use product data: nope"
    );
    assert!(results["benefits"].get("error").is_none());
  }

  #[test]
  fn test_register_replaces_existing_key() {
    let mut manager = BlockManager::new();
    manager.register("price", Broken);

    let available = manager.available();
    assert_eq!(available.len(), 5);
    assert_eq!(available[4].name, "broken-block");
  }

  #[test]
  fn test_available_lists_names_and_descriptions() {
    let available = BlockManager::new().available();

    let names: Vec<&str> = available.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
      names,
      [
        "generate-benefits-block",
        "extract-usage-block",
        "analyze-ingredients-block",
        "safety-warning-block",
        "format-price-block"
      ]
    );
    assert_eq!(available[0].key, "benefits");
  }
}
