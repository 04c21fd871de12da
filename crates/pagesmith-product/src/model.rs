use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
  pub name: String,
  pub concentration: String,
  pub skin_type: Vec<String>,
  pub key_ingredients: Vec<String>,
  pub benefits: Vec<String>,
  pub how_to_use: String,
  pub side_effects: String,
  pub price: String,
  /// When the record was parsed.
  pub parsed_at: DateTime<Utc>,
}

/// FAQ question categories, in the order pages present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionCategory {
  Informational,
  Safety,
  Usage,
  Purchase,
  Comparison,
}

impl QuestionCategory {
  pub const ALL: [QuestionCategory; 5] = [
    QuestionCategory::Informational,
    QuestionCategory::Safety,
    QuestionCategory::Usage,
    QuestionCategory::Purchase,
    QuestionCategory::Comparison,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      QuestionCategory::Informational => "Informational",
      QuestionCategory::Safety => "Safety",
      QuestionCategory::Usage => "Usage",
      QuestionCategory::Purchase => "Purchase",
      QuestionCategory::Comparison => "Comparison",
    }
  }

  /// Product fields an answer in this category draws on.
  pub fn source_fields(self) -> &'static [&'static str] {
    match self {
      QuestionCategory::Informational => &["name", "concentration", "key_ingredients", "skin_type"],
      QuestionCategory::Safety => &["side_effects", "skin_type"],
      QuestionCategory::Usage => &["how_to_use"],
      QuestionCategory::Purchase => &["price"],
      QuestionCategory::Comparison => &["name", "benefits", "price", "key_ingredients"],
    }
  }
}

impl fmt::Display for QuestionCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One generated FAQ entry. `answer` is filled in when the page is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
  pub id: u32,
  pub category: QuestionCategory,
  pub question: String,
  pub answer: String,
  pub source_data: Vec<String>,
}
