//! Pagesmith Config
//!
//! Serializable configuration for a pagesmith run: the raw product record fed
//! into the pipeline and the settings that control where pages are written.
//!
//! Configuration is layered. Built-in defaults come first, then an optional
//! JSON file (`--config=pagesmith.json`), then environment variables, and the
//! CLI applies its own flags last.

mod app;
mod error;
mod product;

pub use app::{AppConfig, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV};
pub use error::ConfigError;
pub use product::RawProduct;
