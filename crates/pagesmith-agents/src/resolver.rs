use pagesmith_orchestrator::{InputResolver, ResolveError, WorkflowContext};
use pagesmith_templates::TemplateData;
use serde_json::Value;
use tracing::debug;

use crate::pipeline::{CONTENT_BLOCKS, PARSER, QUESTION_GENERATOR};

/// Shapes each pipeline node's input from the run context.
///
/// - `parser` gets the initial input.
/// - `question_generator` and `content_blocks` get the parser's output.
/// - `*_template` nodes get [`TemplateData`] assembled from whatever parser,
///   question and block outputs are present.
/// - Anything else gets the whole context.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineResolver;

impl InputResolver for PipelineResolver {
  fn resolve(&self, node: &str, context: &WorkflowContext) -> Result<Value, ResolveError> {
    match node {
      PARSER => Ok(context.initial_input().clone()),
      QUESTION_GENERATOR | CONTENT_BLOCKS => Ok(context.upstream(node, PARSER)?.clone()),
      _ if node.ends_with("_template") => template_input(context),
      _ => Ok(context.to_json()),
    }
  }
}

fn template_input(context: &WorkflowContext) -> Result<Value, ResolveError> {
  // Nodes missing from this workflow simply leave their fields unset.
  let output = |key: &str| context.get(key).ok().flatten();

  debug!(
    has_questions = output(QUESTION_GENERATOR).is_some(),
    has_blocks = output(CONTENT_BLOCKS).is_some(),
    "template_input_resolved"
  );

  let data = TemplateData::from_values(
    output(PARSER),
    output(QUESTION_GENERATOR).cloned(),
    output(CONTENT_BLOCKS).cloned(),
  )
  .and_then(serde_json::to_value)
  .map_err(|e| ResolveError::Invalid {
    message: format!("cannot assemble template data: {}", e),
  })?;

  Ok(data)
}
