//! Pagesmith Templates
//!
//! Page templates assemble the final JSON pages from the pieces earlier
//! pipeline stages produce: product info, generated questions and content
//! block results. Every rendered page is wrapped in a metadata envelope
//! (`page_type`, `generated_at`, `template_version`, `content`).

mod comparison;
mod data;
mod error;
mod faq;
mod manager;
mod page;
mod product_page;

pub use comparison::{ComparisonTemplate, ReferenceProduct};
pub use data::{ProductInfo, TemplateData};
pub use error::TemplateError;
pub use faq::FaqTemplate;
pub use manager::{TemplateInfo, TemplateManager};
pub use page::{PageTemplate, TEMPLATE_VERSION};
pub use product_page::ProductPageTemplate;
