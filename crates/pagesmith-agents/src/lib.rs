//! Pagesmith Agents
//!
//! Wires the content stages into an orchestrator workflow:
//!
//! ```text
//!            ┌──▶ question_generator ──┐
//!  parser ───┤                         ├──▶ faq_template
//!            └──▶ content_blocks ──────┼──▶ product_template
//!                                      └──▶ comparison_template
//! ```
//!
//! Each stage is a [`pagesmith_orchestrator::Step`]; [`PipelineResolver`]
//! decides what each one receives from the run context.

mod output;
mod pipeline;
mod resolver;
mod steps;

pub use output::{PAGE_NODES, PipelineOutput, WorkflowReport};
pub use pipeline::{
  COMPARISON_TEMPLATE, CONTENT_BLOCKS, FAQ_TEMPLATE, PARSER, PRODUCT_TEMPLATE, QUESTION_GENERATOR,
  build_pipeline, register_pipeline,
};
pub use resolver::PipelineResolver;
pub use steps::{ContentBlocksStep, ParserStep, QuestionStep, TemplateStep};
