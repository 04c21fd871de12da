use pagesmith_product::ProductData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::ContentBlock;
use crate::error::BlockError;

/// Bottle size the per-ml estimate assumes.
const ESTIMATED_ML: f64 = 30.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceContent {
  pub display_price: String,
  pub numeric_value: u64,
  pub currency: String,
  pub price_category: String,
  pub value_rating: String,
  pub price_per_ml: String,
  pub comparison_note: String,
}

/// Formats the price and places it in a market segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceBlock;

impl PriceBlock {
  pub fn content(&self, product: &ProductData) -> Result<PriceContent, BlockError> {
    let value = numeric_price(&product.price).ok_or_else(|| BlockError::InvalidProduct {
      block: self.name().to_string(),
      message: format!("price '{}' contains no digits", product.price),
    })?;

    let (category, rating) = match value {
      v if v < 500 => ("Budget", "Good value"),
      v if v < 1000 => ("Mid-range", "Premium quality"),
      _ => ("Luxury", "High-end"),
    };

    Ok(PriceContent {
      display_price: product.price.clone(),
      numeric_value: value,
      currency: "INR".to_string(),
      price_category: category.to_string(),
      value_rating: rating.to_string(),
      price_per_ml: format!("₹{:.2}/ml (estimated)", value as f64 / ESTIMATED_ML),
      comparison_note: "Competitively priced for a Vitamin C serum".to_string(),
    })
  }
}

impl ContentBlock for PriceBlock {
  fn name(&self) -> &'static str {
    "format-price-block"
  }

  fn description(&self) -> &'static str {
    "Formats price information and value analysis"
  }

  fn apply(&self, product: &ProductData) -> Result<Value, BlockError> {
    Ok(serde_json::to_value(self.content(product)?)?)
  }
}

/// Read every ASCII digit in `text` as one number, ignoring everything else.
///
/// `"₹1,299"` reads as 1299. Returns `None` when there are no digits.
/// Decimal digits from other scripts (Devanagari `१२`, fullwidth `１２`) are
/// not read.
pub fn numeric_price(text: &str) -> Option<u64> {
  let mut digits = text.chars().filter_map(|c| c.to_digit(10)).peekable();
  digits.peek()?;
  Some(digits.fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d))))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::sample;

  #[test]
  fn test_sample_is_mid_range() {
    let content = PriceBlock.content(&sample()).unwrap();

    assert_eq!(content.numeric_value, 699);
    assert_eq!(content.price_category, "Mid-range");
    assert_eq!(content.value_rating, "Premium quality");
    assert_eq!(content.price_per_ml, "₹23.30/ml (estimated)");
    assert_eq!(content.currency, "INR");
  }

  #[test]
  fn test_price_bands() {
    let mut product = sample();
    let bands = [("₹499", "Budget"), ("₹500", "Mid-range"), ("₹1,000", "Luxury")];
    for (price, category) in bands {
      product.price = price.to_string();
      assert_eq!(PriceBlock.content(&product).unwrap().price_category, category, "{price}");
    }
  }

  #[test]
  fn test_price_without_digits_fails() {
    let mut product = sample();
    product.price = "free".to_string();

    let err = PriceBlock.apply(&product).unwrap_err();
    assert!(matches!(
      err,
      BlockError::InvalidProduct { ref block, .. } if block == "format-price-block"
    ));
  }

  #[test]
  fn test_numeric_price() {
    assert_eq!(numeric_price("₹1,299"), Some(1299));
    assert_eq!(numeric_price("Rs. 0"), Some(0));
    assert_eq!(numeric_price("n/a"), None);
    assert_eq!(numeric_price("₹१२९९"), None);
    assert_eq!(numeric_price("１２ or 3"), Some(3));
  }
}
