//! Execution events and notifiers for observability.
//!
//! Events are emitted as a run progresses so consumers can observe it without
//! touching the orchestrator's state: persist history, drive a progress
//! display, or assert on ordering in tests.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// The order was computed and the run is starting.
  RunStarted {
    execution_id: String,
    order: Vec<String>,
  },

  /// A node has started running.
  NodeStarted { execution_id: String, node: String },

  /// A node has completed successfully.
  NodeCompleted {
    execution_id: String,
    node: String,
    output: serde_json::Value,
  },

  /// A node has failed. The run stops here.
  NodeFailed {
    execution_id: String,
    node: String,
    error: String,
  },

  /// A node was skipped because a dependency did not complete.
  NodeSkipped {
    execution_id: String,
    node: String,
    blocked_by: String,
  },

  /// Every scheduled node reached a terminal state without failure.
  RunCompleted { execution_id: String },

  /// The run was aborted.
  RunFailed { execution_id: String, error: String },
}

/// Receives execution events.
///
/// The orchestrator calls `notify` for each event. Implementations decide
/// what to do with them.
pub trait ExecutionNotifier {
  fn notify(&self, event: ExecutionEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// Sends events to an unbounded channel.
///
/// Sending never blocks, so the receiver can be drained after the run or from
/// another task.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }

  /// Create a notifier together with its receiving end.
  pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExecutionEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Self::new(sender), receiver)
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // Receiver may have been dropped.
    let _ = self.sender.send(event);
  }
}
