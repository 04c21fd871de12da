//! Workflow steps wrapping the content stages.

use std::sync::Arc;

use pagesmith_blocks::BlockManager;
use pagesmith_config::RawProduct;
use pagesmith_orchestrator::{Step, StepError};
use pagesmith_product::{ProductData, ProductParser, QuestionGenerator};
use pagesmith_templates::{TemplateData, TemplateManager};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

fn decode<T: DeserializeOwned>(input: Value, what: &str) -> Result<T, StepError> {
  serde_json::from_value(input)
    .map_err(|e| StepError::invalid_input(format!("expected {}: {}", what, e)))
}

/// Raw record -> [`ProductData`].
#[derive(Debug, Clone, Default)]
pub struct ParserStep {
  parser: ProductParser,
}

impl ParserStep {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Step for ParserStep {
  fn process(&self, input: Value) -> Result<Value, StepError> {
    let raw: RawProduct = decode(input, "a product record of string fields")?;
    let product = self.parser.parse(&raw).map_err(StepError::failed)?;
    Ok(serde_json::to_value(product)?)
  }
}

/// [`ProductData`] -> FAQ questions.
#[derive(Default)]
pub struct QuestionStep {
  generator: QuestionGenerator,
}

impl QuestionStep {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Step for QuestionStep {
  fn process(&self, input: Value) -> Result<Value, StepError> {
    let product: ProductData = decode(input, "parsed product data")?;
    let questions = self.generator.generate(&product).map_err(StepError::failed)?;
    Ok(serde_json::to_value(questions)?)
  }
}

/// [`ProductData`] -> content block results keyed by block.
pub struct ContentBlocksStep {
  manager: BlockManager,
  keys: Option<Vec<String>>,
}

impl ContentBlocksStep {
  /// Apply every registered block.
  pub fn new(manager: BlockManager) -> Self {
    Self { manager, keys: None }
  }

  /// Apply only the named blocks.
  pub fn only<I, S>(mut self, keys: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.keys = Some(keys.into_iter().map(Into::into).collect());
    self
  }
}

impl Default for ContentBlocksStep {
  fn default() -> Self {
    Self::new(BlockManager::new())
  }
}

impl Step for ContentBlocksStep {
  fn process(&self, input: Value) -> Result<Value, StepError> {
    let product: ProductData = decode(input, "parsed product data")?;
    let keys: Option<Vec<&str>> = self
      .keys
      .as_ref()
      .map(|keys| keys.iter().map(String::as_str).collect());
    Ok(Value::Object(self.manager.apply(&product, keys.as_deref())))
  }
}

/// [`TemplateData`] -> one rendered page.
pub struct TemplateStep {
  template: String,
  manager: Arc<TemplateManager>,
}

impl TemplateStep {
  pub fn new(template: impl Into<String>, manager: Arc<TemplateManager>) -> Self {
    Self {
      template: template.into(),
      manager,
    }
  }

  pub fn template(&self) -> &str {
    &self.template
  }
}

impl Step for TemplateStep {
  fn process(&self, input: Value) -> Result<Value, StepError> {
    let data: TemplateData = decode(input, "template data")?;
    debug!(template = %self.template, "template_step_started");
    self.manager.render(&self.template, &data).map_err(StepError::failed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn parsed() -> Value {
    ParserStep::new().process(RawProduct::sample().to_value()).unwrap()
  }

  #[test]
  fn test_parser_step() {
    let product = parsed();
    assert_eq!(product["name"], "GlowBoost Vitamin C Serum");
    assert_eq!(product["skin_type"], json!(["Oily", "Combination"]));
  }

  #[test]
  fn test_parser_step_rejects_non_object() {
    let err = ParserStep::new().process(json!([1, 2])).unwrap_err();
    assert!(matches!(err, StepError::InvalidInput { .. }));
  }

  #[test]
  fn test_parser_step_reports_missing_field() {
    let err = ParserStep::new().process(json!({"Product Name": "Serum"})).unwrap_err();
    assert_eq!(err.to_string(), "missing product field 'Concentration'");
  }

  #[test]
  fn test_question_step() {
    let questions = QuestionStep::new().process(parsed()).unwrap();
    assert_eq!(questions.as_array().unwrap().len(), 15);
  }

  #[test]
  fn test_content_blocks_step_subset() {
    let blocks = ContentBlocksStep::default().only(["price"]).process(parsed()).unwrap();
    assert_eq!(blocks.as_object().unwrap().len(), 1);
    assert_eq!(blocks["price"]["price_category"], "Mid-range");
  }

  #[test]
  fn test_template_step_unknown_template() {
    let step = TemplateStep::new("landing", Arc::new(TemplateManager::new()));
    let err = step.process(json!({})).unwrap_err();
    assert_eq!(err.to_string(), "template 'landing' not found");
  }
}
