use std::sync::Arc;

use pagesmith_blocks::BlockManager;
use pagesmith_orchestrator::{ExecutionNotifier, GraphError, Orchestrator};
use pagesmith_templates::TemplateManager;

use crate::resolver::PipelineResolver;
use crate::steps::{ContentBlocksStep, ParserStep, QuestionStep, TemplateStep};

pub const PARSER: &str = "parser";
pub const QUESTION_GENERATOR: &str = "question_generator";
pub const CONTENT_BLOCKS: &str = "content_blocks";
pub const FAQ_TEMPLATE: &str = "faq_template";
pub const PRODUCT_TEMPLATE: &str = "product_template";
pub const COMPARISON_TEMPLATE: &str = "comparison_template";

/// The content pipeline on an orchestrator that discards events.
pub fn build_pipeline() -> Result<Orchestrator, GraphError> {
  register_pipeline(Orchestrator::new())
}

/// Register the six pipeline nodes on `orchestrator` and install the
/// pipeline's input resolver.
pub fn register_pipeline<N: ExecutionNotifier>(
  orchestrator: Orchestrator<N>,
) -> Result<Orchestrator<N>, GraphError> {
  let mut orchestrator = orchestrator.with_resolver(PipelineResolver);
  let templates = Arc::new(TemplateManager::new());

  orchestrator.add_node(PARSER, ParserStep::new(), &[])?;
  orchestrator.add_node(QUESTION_GENERATOR, QuestionStep::new(), &[PARSER])?;
  orchestrator.add_node(
    CONTENT_BLOCKS,
    ContentBlocksStep::new(BlockManager::new()),
    &[PARSER],
  )?;
  orchestrator.add_node(
    FAQ_TEMPLATE,
    TemplateStep::new("faq", Arc::clone(&templates)),
    &[QUESTION_GENERATOR, CONTENT_BLOCKS],
  )?;
  orchestrator.add_node(
    PRODUCT_TEMPLATE,
    TemplateStep::new("product_page", Arc::clone(&templates)),
    &[CONTENT_BLOCKS],
  )?;
  orchestrator.add_node(
    COMPARISON_TEMPLATE,
    TemplateStep::new("comparison_page", templates),
    &[CONTENT_BLOCKS],
  )?;

  Ok(orchestrator)
}
