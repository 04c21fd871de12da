use std::collections::BTreeMap;

use pagesmith_orchestrator::{
  ContextSummary, ExecutionNotifier, ExecutionResult, NodeStatus, Orchestrator, StatusSnapshot,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pipeline::{COMPARISON_TEMPLATE, FAQ_TEMPLATE, PRODUCT_TEMPLATE};

/// Template node -> page key (also the page's file stem).
pub const PAGE_NODES: [(&str, &str); 3] = [
  (FAQ_TEMPLATE, "faq"),
  (PRODUCT_TEMPLATE, "product_page"),
  (COMPARISON_TEMPLATE, "comparison_page"),
];

/// Summary of a pipeline run, written next to the pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowReport {
  pub workflow_completed: bool,
  pub execution_id: Option<String>,
  pub total_nodes: usize,
  pub successful_nodes: usize,
  pub execution_summary: Option<ContextSummary>,
}

impl WorkflowReport {
  pub fn from_status(status: &StatusSnapshot) -> Self {
    Self {
      workflow_completed: status.count(NodeStatus::Completed) == status.total_nodes,
      execution_id: status.execution_id.clone(),
      total_nodes: status.total_nodes,
      successful_nodes: status.count(NodeStatus::Completed),
      execution_summary: status.context.clone(),
    }
  }
}

/// Rendered pages keyed by page name, plus the run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
  pub pages: BTreeMap<String, Value>,
  pub report: WorkflowReport,
}

impl PipelineOutput {
  pub fn from_result(result: &ExecutionResult, status: &StatusSnapshot) -> Self {
    let pages = PAGE_NODES
      .iter()
      .filter_map(|(node, page)| result.output(node).map(|v| (page.to_string(), v.clone())))
      .collect();

    Self {
      pages,
      report: WorkflowReport::from_status(status),
    }
  }

  /// Collect whatever the latest run left in the context. Works after a
  /// failed run, when no [`ExecutionResult`] exists.
  pub fn from_orchestrator<N: ExecutionNotifier>(orchestrator: &Orchestrator<N>) -> Self {
    let pages = match orchestrator.context() {
      Some(context) => PAGE_NODES
        .iter()
        .filter_map(|(node, page)| {
          let output = context.get(node).ok().flatten()?;
          Some((page.to_string(), output.clone()))
        })
        .collect(),
      None => BTreeMap::new(),
    };

    Self {
      pages,
      report: WorkflowReport::from_status(&orchestrator.status_report()),
    }
  }

  pub fn page(&self, name: &str) -> Option<&Value> {
    self.pages.get(name)
  }
}
