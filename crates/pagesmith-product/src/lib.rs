//! Pagesmith Product
//!
//! The typed product model shared by every page generator, the parser that
//! builds it from a [`pagesmith_config::RawProduct`], and the question
//! generator that derives FAQ entries from it.

mod error;
mod model;
mod parser;
mod questions;

pub use error::ProductError;
pub use model::{FaqItem, ProductData, QuestionCategory};
pub use parser::ProductParser;
pub use questions::{QUESTIONS_PER_CATEGORY, QuestionGenerator};
