//! Read-only status snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ContextSummary;
use crate::node::{Node, NodeStatus};

/// Errors longer than this are cut in snapshots.
const MAX_ERROR_CHARS: usize = 200;

/// Snapshot of every node and the latest run context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
  /// Execution ID of the latest run, if one has started.
  pub execution_id: Option<String>,
  pub total_nodes: usize,
  /// Order computed for the latest run.
  pub order: Vec<String>,
  /// Nodes in registration order.
  pub nodes: Vec<NodeSnapshot>,
  pub context: Option<ContextSummary>,
}

impl StatusSnapshot {
  pub fn node(&self, name: &str) -> Option<&NodeSnapshot> {
    self.nodes.iter().find(|n| n.name == name)
  }

  /// Number of nodes with the given status.
  pub fn count(&self, status: NodeStatus) -> usize {
    self.nodes.iter().filter(|n| n.status == status).count()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
  pub name: String,
  pub status: NodeStatus,
  pub dependencies: Vec<String>,
  pub started_at: Option<DateTime<Utc>>,
  pub finished_at: Option<DateTime<Utc>>,
  pub duration_ms: Option<i64>,
  pub has_output: bool,
  pub error: Option<String>,
}

impl From<&Node> for NodeSnapshot {
  fn from(node: &Node) -> Self {
    let state = node.state();
    Self {
      name: node.name().to_string(),
      status: state.status,
      dependencies: node.dependencies().to_vec(),
      started_at: state.started_at,
      finished_at: state.finished_at,
      duration_ms: state.duration().map(|d| d.num_milliseconds()),
      has_output: state.output.is_some(),
      error: state.error.as_deref().map(truncate_error),
    }
  }
}

fn truncate_error(error: &str) -> String {
  match error.char_indices().nth(MAX_ERROR_CHARS) {
    Some((cut, _)) => format!("{}...", &error[..cut]),
    None => error.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_short_errors_are_kept() {
    assert_eq!(truncate_error("boom"), "boom");
  }

  #[test]
  fn test_long_errors_are_cut_on_char_boundary() {
    let long = "₹".repeat(250);
    let cut = truncate_error(&long);
    assert!(cut.ends_with("..."));
    assert_eq!(cut.chars().count(), MAX_ERROR_CHARS + 3);
  }
}
