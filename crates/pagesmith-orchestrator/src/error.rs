//! Orchestrator errors.

use std::fmt;

use thiserror::Error;

/// Errors raised while building or ordering the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  /// A node with this name is already registered.
  #[error("node '{name}' already exists")]
  DuplicateNode { name: String },

  /// The name is reserved for the run's initial input.
  #[error("node name '{name}' is reserved")]
  ReservedName { name: String },

  /// A node declares a dependency that was never registered.
  #[error("dependency '{dependency}' not found for node '{node}'")]
  MissingDependency { node: String, dependency: String },

  /// The dependency graph is not acyclic.
  #[error("cycle detected in workflow involving node '{node}'")]
  CycleDetected { node: String },
}

/// Errors that abort a workflow run.
#[derive(Debug, Error)]
pub enum ExecutionError {
  /// The graph could not be ordered. No node ran.
  #[error(transparent)]
  Graph(#[from] GraphError),

  /// A node failed and the run was stopped.
  #[error("node '{node}' failed: {source}")]
  NodeExecution {
    node: String,
    #[source]
    source: StepError,
  },
}

impl ExecutionError {
  /// Name of the node the error is attributed to, if any.
  ///
  /// For graph errors this is the node where the problem was found.
  pub fn node(&self) -> Option<&str> {
    match self {
      ExecutionError::NodeExecution { node, .. } => Some(node),
      ExecutionError::Graph(GraphError::MissingDependency { node, .. }) => Some(node),
      ExecutionError::Graph(GraphError::CycleDetected { node }) => Some(node),
      ExecutionError::Graph(GraphError::DuplicateNode { name })
      | ExecutionError::Graph(GraphError::ReservedName { name }) => Some(name),
    }
  }
}

/// Errors a step reports back to the engine.
#[derive(Debug, Error)]
pub enum StepError {
  /// The step received a value it cannot work with.
  #[error("invalid input: {message}")]
  InvalidInput { message: String },

  /// The node's input could not be assembled from the context.
  #[error("input resolution failed: {0}")]
  InputResolution(#[from] ResolveError),

  /// The step ran and failed.
  #[error("{message}")]
  Failed { message: String },

  /// Converting to or from a JSON value failed.
  #[error("serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl StepError {
  pub fn invalid_input(message: impl fmt::Display) -> Self {
    StepError::InvalidInput {
      message: message.to_string(),
    }
  }

  pub fn failed(message: impl fmt::Display) -> Self {
    StepError::Failed {
      message: message.to_string(),
    }
  }
}

/// Errors from the run context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
  /// The key is neither a registered node nor the initial input.
  #[error("unknown context key '{key}'")]
  UnknownKey { key: String },

  /// The key already holds a value for this run.
  #[error("context key '{key}' is already set")]
  AlreadySet { key: String },
}

/// Errors from an input resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// A dependency's output is not in the context.
  #[error("output of '{dependency}' is not available for node '{node}'")]
  MissingOutput { node: String, dependency: String },

  /// The resolver asked the context for a key it does not know.
  #[error(transparent)]
  Context(#[from] ContextError),

  /// The resolver could not build the input for another reason.
  #[error("{message}")]
  Invalid { message: String },
}
