//! FAQ page.

use chrono::Utc;
use minijinja::{Environment, context};
use pagesmith_blocks::ContentBlocks;
use pagesmith_product::{FaqItem, QuestionCategory};
use serde::Serialize;
use serde_json::Value;

use crate::data::{ProductInfo, TemplateData};
use crate::error::TemplateError;
use crate::page::{PageTemplate, read_field};

#[derive(Debug, Serialize)]
struct FaqPage {
  title: String,
  product: FaqProduct,
  summary: String,
  categories: Vec<FaqCategory>,
  total_questions: usize,
  last_updated: String,
}

#[derive(Debug, Serialize)]
struct FaqProduct {
  name: String,
  price: String,
  category: &'static str,
}

#[derive(Debug, Serialize)]
struct FaqCategory {
  name: QuestionCategory,
  count: usize,
  questions: Vec<FaqEntry>,
}

#[derive(Debug, Serialize)]
struct FaqEntry {
  id: u32,
  question: String,
  answer: String,
}

/// Questions grouped by category, each answered from the content blocks.
pub struct FaqTemplate {
  env: Environment<'static>,
}

impl FaqTemplate {
  pub fn new() -> Self {
    Self {
      env: Environment::new(),
    }
  }

  fn answer(&self, item: &FaqItem, blocks: &ContentBlocks) -> Result<String, TemplateError> {
    let ctx = context! {
      question => &item.question,
      ingredients => blocks.ingredients.clone().unwrap_or_default(),
      safety => blocks.safety.clone().unwrap_or_default(),
      usage => blocks.usage.clone().unwrap_or_default(),
      price => blocks.price.clone().unwrap_or_default(),
      benefits => blocks.benefits.clone().unwrap_or_default(),
    };

    self
      .env
      .render_str(answer_template(item.category), ctx)
      .map_err(|source| TemplateError::Render {
        template: self.name().to_string(),
        source,
      })
  }
}

impl Default for FaqTemplate {
  fn default() -> Self {
    Self::new()
  }
}

impl PageTemplate for FaqTemplate {
  fn name(&self) -> &'static str {
    "faq"
  }

  fn description(&self) -> &'static str {
    "Frequently Asked Questions page with categorized Q&A"
  }

  fn required_fields(&self) -> &'static [&'static str] {
    &["product_info", "questions", "content_blocks"]
  }

  fn content(&self, data: &TemplateData) -> Result<Value, TemplateError> {
    let product: ProductInfo = read_field(self.name(), data, "product_info")?;
    let questions: Vec<FaqItem> = read_field(self.name(), data, "questions")?;
    let blocks = ContentBlocks::from_value(data.content_blocks.as_ref().unwrap_or(&Value::Null));

    let mut categories: Vec<FaqCategory> = Vec::new();
    for item in &questions {
      let entry = FaqEntry {
        id: item.id,
        question: item.question.clone(),
        answer: self.answer(item, &blocks)?,
      };
      match categories.iter_mut().find(|c| c.name == item.category) {
        Some(category) => category.questions.push(entry),
        None => categories.push(FaqCategory {
          name: item.category,
          count: 0,
          questions: vec![entry],
        }),
      }
    }
    for category in &mut categories {
      category.count = category.questions.len();
    }

    let page = FaqPage {
      title: format!("FAQ - {}", product.name),
      summary: format!(
        "Common questions about {}, a {} serum.",
        product.name, product.concentration
      ),
      product: FaqProduct {
        name: product.name,
        price: product.price,
        category: "Skincare Serum",
      },
      categories,
      total_questions: questions.len(),
      last_updated: Utc::now().format("%Y-%m-%d").to_string(),
    };

    Ok(serde_json::to_value(page)?)
  }
}

fn answer_template(category: QuestionCategory) -> &'static str {
  match category {
    QuestionCategory::Informational => {
      "{{ question | replace('What is', 'This is') | trim('?') }}. \
       It contains {{ ingredients.total_actives }} active ingredients."
    }
    QuestionCategory::Safety => {
      "{{ safety.side_effects or 'Generally safe for most skin types.' }} \
       Recommendations: {{ safety.recommendations | join(', ') }}"
    }
    QuestionCategory::Usage => {
      "{{ usage.main_instruction }}. \
       Best used: {{ usage.best_time or 'Daily' }}. \
       Key tip: {{ usage.key_tip }}"
    }
    QuestionCategory::Purchase => {
      "Price: {{ price.display_price }}. \
       Category: {{ price.price_category }}. \
       Value: {{ price.value_rating }}"
    }
    QuestionCategory::Comparison => {
      "This product offers unique benefits including \
       {{ (benefits.primary_benefits or ['multiple benefits']) | join(', ') }}. \
       Compare with similar products for your specific needs."
    }
  }
}
