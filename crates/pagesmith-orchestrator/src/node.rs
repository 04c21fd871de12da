use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::step::Step;

/// Lifecycle of a node within one run.
///
/// `Pending → Running → Completed | Failed`, or `Pending → Skipped` when a
/// dependency did not complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
  #[default]
  Pending,
  Running,
  Completed,
  Failed,
  Skipped,
}

impl NodeStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      NodeStatus::Pending => "pending",
      NodeStatus::Running => "running",
      NodeStatus::Completed => "completed",
      NodeStatus::Failed => "failed",
      NodeStatus::Skipped => "skipped",
    }
  }

  /// Whether the node is done for this run.
  pub fn is_terminal(self) -> bool {
    matches!(
      self,
      NodeStatus::Completed | NodeStatus::Failed | NodeStatus::Skipped
    )
  }
}

impl fmt::Display for NodeStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Run-scoped state of a node. Reset at the start of every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeState {
  pub status: NodeStatus,
  pub output: Option<Value>,
  pub started_at: Option<DateTime<Utc>>,
  pub finished_at: Option<DateTime<Utc>>,
  pub error: Option<String>,
}

impl NodeState {
  /// Wall time between start and finish, once both are known.
  pub fn duration(&self) -> Option<Duration> {
    match (self.started_at, self.finished_at) {
      (Some(start), Some(end)) => Some(end - start),
      _ => None,
    }
  }
}

/// A registered unit of work.
pub struct Node {
  name: String,
  step: Box<dyn Step>,
  dependencies: Vec<String>,
  pub(crate) state: NodeState,
}

impl Node {
  pub(crate) fn new(name: String, step: Box<dyn Step>, dependencies: &[&str]) -> Self {
    let mut deps: Vec<String> = Vec::with_capacity(dependencies.len());
    for dep in dependencies {
      if !deps.iter().any(|d| d == dep) {
        deps.push((*dep).to_string());
      }
    }

    Self {
      name,
      step,
      dependencies: deps,
      state: NodeState::default(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn dependencies(&self) -> &[String] {
    &self.dependencies
  }

  pub fn state(&self) -> &NodeState {
    &self.state
  }

  pub fn status(&self) -> NodeStatus {
    self.state.status
  }

  pub fn output(&self) -> Option<&Value> {
    self.state.output.as_ref()
  }

  pub(crate) fn step(&self) -> &dyn Step {
    self.step.as_ref()
  }

  pub(crate) fn reset(&mut self) {
    self.state = NodeState::default();
  }
}

impl fmt::Debug for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Node")
      .field("name", &self.name)
      .field("dependencies", &self.dependencies)
      .field("state", &self.state)
      .finish_non_exhaustive()
  }
}
