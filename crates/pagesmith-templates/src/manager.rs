use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::comparison::ComparisonTemplate;
use crate::data::TemplateData;
use crate::error::TemplateError;
use crate::faq::FaqTemplate;
use crate::page::PageTemplate;
use crate::product_page::ProductPageTemplate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
  pub name: String,
  pub description: String,
  pub required_fields: Vec<String>,
}

/// Registry of page templates, looked up by page type.
pub struct TemplateManager {
  templates: Vec<Box<dyn PageTemplate>>,
}

impl TemplateManager {
  /// A manager with the FAQ, product and comparison templates.
  pub fn new() -> Self {
    let mut manager = Self {
      templates: Vec::new(),
    };
    manager.register(FaqTemplate::new());
    manager.register(ProductPageTemplate);
    manager.register(ComparisonTemplate::new());
    manager
  }

  /// Register a template, replacing one with the same name.
  pub fn register(&mut self, template: impl PageTemplate + 'static) {
    let template: Box<dyn PageTemplate> = Box::new(template);
    match self.templates.iter_mut().find(|t| t.name() == template.name()) {
      Some(slot) => *slot = template,
      None => self.templates.push(template),
    }
  }

  pub fn get(&self, name: &str) -> Option<&dyn PageTemplate> {
    self
      .templates
      .iter()
      .find(|t| t.name() == name)
      .map(|t| &**t)
  }

  /// Render one page.
  pub fn render(&self, name: &str, data: &TemplateData) -> Result<Value, TemplateError> {
    let template = self.get(name).ok_or_else(|| TemplateError::UnknownTemplate {
      name: name.to_string(),
    })?;
    template.render(data)
  }

  /// Render every registered page from the same data.
  ///
  /// A page that fails is recorded as `{"error": message}` under its name.
  pub fn render_all(&self, data: &TemplateData) -> Map<String, Value> {
    let mut pages = Map::new();
    for template in &self.templates {
      let page = template.render(data).unwrap_or_else(|e| {
        warn!(template = template.name(), error = %e, "page_failed");
        json!({ "error": e.to_string() })
      });
      pages.insert(template.name().to_string(), page);
    }
    info!(pages = pages.len(), "pages_rendered");
    pages
  }

  /// Registered templates, in registration order.
  pub fn info(&self) -> Vec<TemplateInfo> {
    self
      .templates
      .iter()
      .map(|t| TemplateInfo {
        name: t.name().to_string(),
        description: t.description().to_string(),
        required_fields: t.required_fields().iter().map(|f| f.to_string()).collect(),
      })
      .collect()
  }
}

impl Default for TemplateManager {
  fn default() -> Self {
    Self::new()
  }
}
