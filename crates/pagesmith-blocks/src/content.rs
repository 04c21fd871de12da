use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::benefits::BenefitsContent;
use crate::ingredients::IngredientsContent;
use crate::price::PriceContent;
use crate::safety::SafetyContent;
use crate::usage::UsageContent;

/// Typed, read-only view over a block results map.
///
/// A block that was not applied, failed (`{"error": ...}`), or produced
/// something unreadable shows up as `None`. Page templates fall back to
/// defaults for those.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentBlocks {
  pub benefits: Option<BenefitsContent>,
  pub usage: Option<UsageContent>,
  pub ingredients: Option<IngredientsContent>,
  pub safety: Option<SafetyContent>,
  pub price: Option<PriceContent>,
}

impl ContentBlocks {
  pub fn from_value(value: &Value) -> Self {
    let empty = Map::new();
    let map = value.as_object().unwrap_or(&empty);
    Self {
      benefits: read(map, "benefits"),
      usage: read(map, "usage"),
      ingredients: read(map, "ingredients"),
      safety: read(map, "safety"),
      price: read(map, "price"),
    }
  }
}

fn read<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
  let value = map.get(key)?;
  if value.get("error").is_some() {
    return None;
  }
  serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_reads_present_blocks() {
    let blocks = ContentBlocks::from_value(&json!({
      "price": {"display_price": "₹699", "numeric_value": 699},
      "usage": {"error": "boom"},
    }));

    let price = blocks.price.unwrap();
    assert_eq!(price.display_price, "₹699");
    assert_eq!(price.price_category, "");
    assert!(blocks.usage.is_none());
    assert!(blocks.benefits.is_none());
  }

  #[test]
  fn test_non_object_is_empty() {
    assert_eq!(ContentBlocks::from_value(&json!(null)), ContentBlocks::default());
  }
}
