//! Input resolution.
//!
//! The engine knows nothing about what a node's input should look like. An
//! [`InputResolver`] builds it from the run context when the node's turn comes.

use serde_json::Value;

use crate::context::WorkflowContext;
use crate::error::ResolveError;

/// Builds a node's input from the current context.
pub trait InputResolver {
  fn resolve(&self, node: &str, context: &WorkflowContext) -> Result<Value, ResolveError>;
}

/// Passes every populated context entry to every node, keyed by producer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeContextResolver;

impl InputResolver for WholeContextResolver {
  fn resolve(&self, _node: &str, context: &WorkflowContext) -> Result<Value, ResolveError> {
    Ok(context.to_json())
  }
}

impl<F> InputResolver for F
where
  F: Fn(&str, &WorkflowContext) -> Result<Value, ResolveError>,
{
  fn resolve(&self, node: &str, context: &WorkflowContext) -> Result<Value, ResolveError> {
    self(node, context)
  }
}
