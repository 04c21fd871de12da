//! The orchestrator: node registry plus sequential execution engine.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::context::{INITIAL_INPUT, WorkflowContext};
use crate::error::{ExecutionError, GraphError, StepError};
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::graph::DependencyGraph;
use crate::node::{Node, NodeStatus};
use crate::report::{NodeSnapshot, StatusSnapshot};
use crate::resolver::{InputResolver, WholeContextResolver};
use crate::step::Step;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
  /// Unique execution ID.
  pub execution_id: String,
  /// Outputs of every completed node, keyed by node name.
  pub outputs: HashMap<String, Value>,
}

impl ExecutionResult {
  pub fn output(&self, node: &str) -> Option<&Value> {
    self.outputs.get(node)
  }
}

/// Registers nodes and runs them in dependency order.
///
/// Generic over `N: ExecutionNotifier` so callers can observe runs. Use
/// `Orchestrator::new()` for an orchestrator that discards events, or
/// `Orchestrator::with_notifier()` to supply one.
pub struct Orchestrator<N: ExecutionNotifier = NoopNotifier> {
  /// Nodes in registration order.
  nodes: Vec<Node>,
  /// name -> position in `nodes`.
  index: HashMap<String, usize>,
  resolver: Box<dyn InputResolver>,
  notifier: N,
  execution_order: Vec<String>,
  /// Context of the latest run.
  context: Option<WorkflowContext>,
}

impl Orchestrator<NoopNotifier> {
  pub fn new() -> Self {
    Self::with_notifier(NoopNotifier)
  }
}

impl Default for Orchestrator<NoopNotifier> {
  fn default() -> Self {
    Self::new()
  }
}

impl<N: ExecutionNotifier> Orchestrator<N> {
  pub fn with_notifier(notifier: N) -> Self {
    Self {
      nodes: Vec::new(),
      index: HashMap::new(),
      resolver: Box::new(WholeContextResolver),
      notifier,
      execution_order: Vec::new(),
      context: None,
    }
  }

  /// Replace the input resolver. The default passes the whole context.
  pub fn with_resolver(mut self, resolver: impl InputResolver + 'static) -> Self {
    self.resolver = Box::new(resolver);
    self
  }

  /// Register a node.
  ///
  /// Dependencies are checked when the order is built, so nodes may be added
  /// in any order. Fails if `name` is already registered or is the reserved
  /// [`INITIAL_INPUT`] key, leaving the graph unchanged.
  pub fn add_node(
    &mut self,
    name: impl Into<String>,
    step: impl Step + 'static,
    dependencies: &[&str],
  ) -> Result<(), GraphError> {
    let name = name.into();
    if name == INITIAL_INPUT {
      return Err(GraphError::ReservedName { name });
    }
    if self.index.contains_key(&name) {
      return Err(GraphError::DuplicateNode { name });
    }

    debug!(node = %name, dependencies = ?dependencies, "node_added");

    self.index.insert(name.clone(), self.nodes.len());
    self.nodes.push(Node::new(name, Box::new(step), dependencies));
    Ok(())
  }

  /// Compute the execution order for the current graph.
  pub fn build_order(&self) -> Result<Vec<String>, GraphError> {
    DependencyGraph::from_nodes(&self.nodes).topological_order()
  }

  /// Run every node once, in dependency order.
  ///
  /// Each call starts from a fresh context seeded with `initial_input` and
  /// resets every node to `Pending`. The first failing node aborts the run;
  /// outputs of nodes that completed before it stay readable through
  /// [`Orchestrator::context`] and [`Orchestrator::status_report`].
  #[instrument(name = "workflow_execute", skip_all, fields(total_nodes = self.nodes.len()))]
  pub fn execute(&mut self, initial_input: Value) -> Result<ExecutionResult, ExecutionError> {
    let order = self.build_order().inspect_err(|e| {
      error!(error = %e, "workflow_invalid");
    })?;

    let execution_id = uuid::Uuid::new_v4().to_string();
    for node in &mut self.nodes {
      node.reset();
    }
    self.execution_order = order.clone();

    let mut context = WorkflowContext::new(
      execution_id.clone(),
      self.nodes.iter().map(|n| n.name().to_string()),
      initial_input,
    );

    info!(
      execution_id = %execution_id,
      order = %order.join(" -> "),
      "workflow_started"
    );
    self.notifier.notify(ExecutionEvent::RunStarted {
      execution_id: execution_id.clone(),
      order: order.clone(),
    });

    let result = self.run_loop(&order, &mut context);

    match &result {
      Ok(()) => {
        info!(execution_id = %execution_id, "workflow_completed");
        self.notifier.notify(ExecutionEvent::RunCompleted {
          execution_id: execution_id.clone(),
        });
      }
      Err(e) => {
        error!(execution_id = %execution_id, error = %e, "workflow_failed");
        self.notifier.notify(ExecutionEvent::RunFailed {
          execution_id: execution_id.clone(),
          error: e.to_string(),
        });
      }
    }

    let outputs = self
      .nodes
      .iter()
      .filter(|n| n.status() == NodeStatus::Completed)
      .filter_map(|n| {
        context
          .get(n.name())
          .ok()
          .flatten()
          .map(|v| (n.name().to_string(), v.clone()))
      })
      .collect();

    self.context = Some(context);
    result?;

    Ok(ExecutionResult {
      execution_id,
      outputs,
    })
  }

  /// Walk the order, skipping blocked nodes and stopping at the first failure.
  ///
  /// After a failure the rest of the order is still walked once so that every
  /// dependent of the failed node ends up `Skipped`. Independent nodes stay
  /// `Pending`; nothing runs after the failure point.
  fn run_loop(
    &mut self,
    order: &[String],
    context: &mut WorkflowContext,
  ) -> Result<(), ExecutionError> {
    let mut failure = None;

    for name in order {
      let Some(&idx) = self.index.get(name) else {
        continue;
      };

      if let Some(blocked_by) = self.blocking_dependency(idx) {
        self.skip_node(idx, blocked_by, context);
        continue;
      }
      if failure.is_some() {
        continue;
      }

      if let Err(e) = self.run_node(idx, context) {
        failure = Some(e);
      }
    }

    match failure {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }

  /// First dependency of the node that failed or was skipped.
  ///
  /// The order puts every dependency ahead of its dependents, so a dependency
  /// that is still `Pending` at this point was left behind by a failure
  /// elsewhere and does not block.
  fn blocking_dependency(&self, idx: usize) -> Option<String> {
    self.nodes[idx]
      .dependencies()
      .iter()
      .find(|dep| {
        matches!(
          self.node(dep).map(Node::status),
          Some(NodeStatus::Failed | NodeStatus::Skipped)
        )
      })
      .cloned()
  }

  fn skip_node(&mut self, idx: usize, blocked_by: String, context: &mut WorkflowContext) {
    let node = &mut self.nodes[idx];
    node.state.status = NodeStatus::Skipped;

    let message = format!("dependency '{}' not completed", blocked_by);
    warn!(node = %node.name(), blocked_by = %blocked_by, "node_skipped");
    context.log(node.name(), NodeStatus::Skipped, message);

    self.notifier.notify(ExecutionEvent::NodeSkipped {
      execution_id: context.execution_id().to_string(),
      node: node.name().to_string(),
      blocked_by,
    });
  }

  fn run_node(&mut self, idx: usize, context: &mut WorkflowContext) -> Result<(), ExecutionError> {
    let Self {
      nodes,
      resolver,
      notifier,
      ..
    } = self;
    let node = &mut nodes[idx];
    let name = node.name().to_string();
    let execution_id = context.execution_id().to_string();

    node.state.status = NodeStatus::Running;
    node.state.started_at = Some(Utc::now());
    context.log(&name, NodeStatus::Running, "");
    info!(execution_id = %execution_id, node = %name, "node_started");
    notifier.notify(ExecutionEvent::NodeStarted {
      execution_id: execution_id.clone(),
      node: name.clone(),
    });

    let outcome = resolver
      .resolve(&name, context)
      .map_err(StepError::from)
      .and_then(|input| node.step().process(input))
      .and_then(|output| {
        context
          .insert(&name, output.clone())
          .map(|()| output)
          .map_err(StepError::failed)
      });

    node.state.finished_at = Some(Utc::now());

    match outcome {
      Ok(output) => {
        let secs = node
          .state
          .duration()
          .map(|d| d.num_milliseconds() as f64 / 1000.0)
          .unwrap_or_default();

        node.state.status = NodeStatus::Completed;
        node.state.output = Some(output.clone());
        context.log(&name, NodeStatus::Completed, format!("duration: {:.2}s", secs));
        info!(execution_id = %execution_id, node = %name, duration_secs = secs, "node_completed");
        notifier.notify(ExecutionEvent::NodeCompleted {
          execution_id,
          node: name,
          output,
        });
        Ok(())
      }
      Err(source) => {
        let message = source.to_string();
        node.state.status = NodeStatus::Failed;
        node.state.error = Some(message.clone());
        context.log(&name, NodeStatus::Failed, message.clone());
        error!(execution_id = %execution_id, node = %name, error = %message, "node_failed");
        notifier.notify(ExecutionEvent::NodeFailed {
          execution_id,
          node: name.clone(),
          error: message,
        });
        Err(ExecutionError::NodeExecution { node: name, source })
      }
    }
  }

  /// Snapshot of every node and the latest run's context.
  pub fn status_report(&self) -> StatusSnapshot {
    StatusSnapshot {
      execution_id: self.context.as_ref().map(|c| c.execution_id().to_string()),
      total_nodes: self.nodes.len(),
      order: self.execution_order.clone(),
      nodes: self.nodes.iter().map(NodeSnapshot::from).collect(),
      context: self.context.as_ref().map(WorkflowContext::summary),
    }
  }

  /// Context of the latest run, including partial outputs after a failure.
  pub fn context(&self) -> Option<&WorkflowContext> {
    self.context.as_ref()
  }

  /// Look up a node by name.
  pub fn node(&self, name: &str) -> Option<&Node> {
    self.index.get(name).map(|&i| &self.nodes[i])
  }

  /// Nodes in registration order.
  pub fn nodes(&self) -> &[Node] {
    &self.nodes
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }
}
