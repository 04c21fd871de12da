use chrono::Utc;
use pagesmith_config::RawProduct;
use tracing::{debug, info};

use crate::error::ProductError;
use crate::model::ProductData;

/// Turns a labelled raw record into [`ProductData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductParser;

impl ProductParser {
  pub fn new() -> Self {
    Self
  }

  pub fn parse(&self, raw: &RawProduct) -> Result<ProductData, ProductError> {
    debug!(fields = raw.len(), "product_parse_started");

    let product = ProductData {
      name: field(raw, "Product Name")?.to_string(),
      concentration: field(raw, "Concentration")?.to_string(),
      skin_type: split_list(field(raw, "Skin Type")?),
      key_ingredients: split_list(field(raw, "Key Ingredients")?),
      benefits: split_list(field(raw, "Benefits")?),
      how_to_use: field(raw, "How to Use")?.to_string(),
      side_effects: field(raw, "Side Effects")?.to_string(),
      price: field(raw, "Price")?.to_string(),
      parsed_at: Utc::now(),
    };

    info!(product = %product.name, "product_parsed");
    Ok(product)
  }
}

fn field<'a>(raw: &'a RawProduct, label: &str) -> Result<&'a str, ProductError> {
  raw.get(label).ok_or_else(|| ProductError::MissingField {
    label: label.to_string(),
  })
}

/// Split a comma separated list, trimming items and dropping empty ones.
fn split_list(value: &str) -> Vec<String> {
  value
    .split(',')
    .map(str::trim)
    .filter(|item| !item.is_empty())
    .map(str::to_string)
    .collect()
}
