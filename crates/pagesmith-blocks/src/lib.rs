//! Pagesmith Blocks
//!
//! Content logic blocks turn a [`pagesmith_product::ProductData`] into
//! structured copy: expanded benefits, usage steps, ingredient notes, safety
//! guidance and price analysis. Each block is independent; the
//! [`BlockManager`] applies a selection of them and collects the results,
//! recording a failing block's error in place of its output.

mod benefits;
mod block;
mod content;
mod error;
mod ingredients;
mod manager;
mod price;
mod safety;
mod usage;

pub use benefits::{BenefitsBlock, BenefitsContent};
pub use block::ContentBlock;
pub use content::ContentBlocks;
pub use error::BlockError;
pub use ingredients::{IngredientDetail, IngredientsBlock, IngredientsContent};
pub use manager::{BlockInfo, BlockManager};
pub use price::{PriceBlock, PriceContent, numeric_price};
pub use safety::{SafetyBlock, SafetyContent};
pub use usage::{UsageBlock, UsageContent};

#[cfg(test)]
pub(crate) mod testing {
  use pagesmith_config::RawProduct;
  use pagesmith_product::{ProductData, ProductParser};

  pub fn sample() -> ProductData {
    ProductParser::new().parse(&RawProduct::sample()).unwrap()
  }
}
