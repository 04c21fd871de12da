use pagesmith_product::ProductData;
use serde_json::Value;

use crate::error::BlockError;

/// A reusable transform from product data to a piece of page content.
pub trait ContentBlock {
  /// Unique block name, e.g. `generate-benefits-block`.
  fn name(&self) -> &'static str;

  fn description(&self) -> &'static str;

  fn apply(&self, product: &ProductData) -> Result<Value, BlockError>;
}
