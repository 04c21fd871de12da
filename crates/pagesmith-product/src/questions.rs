//! FAQ question generation.

use minijinja::{Environment, context};
use tracing::info;

use crate::error::ProductError;
use crate::model::{FaqItem, ProductData, QuestionCategory};

/// Questions rendered from each category's template list.
pub const QUESTIONS_PER_CATEGORY: usize = 3;

/// Generates categorized FAQ questions for a product.
pub struct QuestionGenerator {
  env: Environment<'static>,
}

impl QuestionGenerator {
  pub fn new() -> Self {
    Self {
      env: Environment::new(),
    }
  }

  /// Category names, in generation order.
  pub fn categories(&self) -> Vec<&'static str> {
    QuestionCategory::ALL.iter().map(|c| c.as_str()).collect()
  }

  /// Render the first [`QUESTIONS_PER_CATEGORY`] templates of every
  /// category. Ids are sequential from 1 and answers are left empty.
  pub fn generate(&self, product: &ProductData) -> Result<Vec<FaqItem>, ProductError> {
    let ctx = context! {
      name => &product.name,
      concentration => &product.concentration,
      skin_types => product.skin_type.join(", "),
    };

    let mut items = Vec::with_capacity(QuestionCategory::ALL.len() * QUESTIONS_PER_CATEGORY);
    for category in QuestionCategory::ALL {
      let source_data: Vec<String> = category
        .source_fields()
        .iter()
        .map(|f| f.to_string())
        .collect();

      for template in templates(category).iter().take(QUESTIONS_PER_CATEGORY) {
        items.push(FaqItem {
          id: items.len() as u32 + 1,
          category,
          question: self.env.render_str(template, ctx.clone())?,
          answer: String::new(),
          source_data: source_data.clone(),
        });
      }
    }

    info!(product = %product.name, count = items.len(), "questions_generated");
    Ok(items)
  }
}

impl Default for QuestionGenerator {
  fn default() -> Self {
    Self::new()
  }
}

fn templates(category: QuestionCategory) -> &'static [&'static str] {
  match category {
    QuestionCategory::Informational => &[
      "What is {{ name }}?",
      "What are the main ingredients in {{ name }}?",
      "What is the concentration of active ingredients in {{ name }}?",
      "Who should use {{ name }}?",
      "What skin types is {{ name }} suitable for?",
    ],
    QuestionCategory::Safety => &[
      "Are there any side effects of using {{ name }}?",
      "Is {{ name }} safe for sensitive skin?",
      "Can {{ name }} cause irritation?",
      "What precautions should I take with {{ name }}?",
      "Has {{ name }} been tested for safety?",
    ],
    QuestionCategory::Usage => &[
      "How do I use {{ name }}?",
      "When should I apply {{ name }}?",
      "How much {{ name }} should I use per application?",
      "Can I use {{ name }} with other skincare products?",
      "How often should I use {{ name }}?",
    ],
    QuestionCategory::Purchase => &[
      "How much does {{ name }} cost?",
      "Where can I buy {{ name }}?",
      "Is {{ name }} worth the price?",
      "Does {{ name }} offer good value for money?",
      "Are there any discounts available for {{ name }}?",
    ],
    QuestionCategory::Comparison => &[
      "How does {{ name }} compare to other vitamin C serums?",
      "What makes {{ name }} different from competitors?",
      "Is {{ name }} better than other brightening serums?",
      "What are good alternatives to {{ name }}?",
      "Why should I choose {{ name }} over similar products?",
    ],
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::ProductParser;
  use pagesmith_config::RawProduct;

  fn sample() -> ProductData {
    ProductParser::new().parse(&RawProduct::sample()).unwrap()
  }

  #[test]
  fn test_fifteen_questions_with_sequential_ids() {
    let items = QuestionGenerator::new().generate(&sample()).unwrap();

    assert_eq!(items.len(), 15);
    for (i, item) in items.iter().enumerate() {
      assert_eq!(item.id as usize, i + 1);
      assert!(item.answer.is_empty());
    }
  }

  #[test]
  fn test_three_per_category_in_order() {
    let items = QuestionGenerator::new().generate(&sample()).unwrap();

    for (chunk, category) in items.chunks(QUESTIONS_PER_CATEGORY).zip(QuestionCategory::ALL) {
      assert!(chunk.iter().all(|q| q.category == category));
    }
  }

  #[test]
  fn test_questions_name_the_product() {
    let items = QuestionGenerator::new().generate(&sample()).unwrap();

    assert_eq!(items[0].question, "What is GlowBoost Vitamin C Serum?");
    assert_eq!(items[3].question, "Are there any side effects of using GlowBoost Vitamin C Serum?");
    assert_eq!(items[3].source_data, ["side_effects", "skin_type"]);
    assert_eq!(items[9].source_data, ["price"]);
  }

  #[test]
  fn test_categories() {
    assert_eq!(
      QuestionGenerator::new().categories(),
      ["Informational", "Safety", "Usage", "Purchase", "Comparison"]
    );
  }

  #[test]
  fn test_category_serializes_by_name() {
    let item = &QuestionGenerator::new().generate(&sample()).unwrap()[14];
    let value = serde_json::to_value(item).unwrap();
    assert_eq!(value["category"], "Comparison");
    assert_eq!(value["id"], 15);
  }
}
