//! Pagesmith Orchestrator
//!
//! A small DAG workflow engine. Nodes wrap a [`Step`] and declare the nodes
//! they depend on; the [`Orchestrator`] orders them topologically and runs
//! each one exactly once, sequentially, against a shared run-scoped
//! [`WorkflowContext`].
//!
//! Execution is fail-fast: the first failing node aborts the run, nodes
//! downstream of it are never started, and everything produced before the
//! failure stays inspectable through [`Orchestrator::context`] and
//! [`Orchestrator::status_report`].

mod context;
mod error;
mod events;
mod graph;
mod node;
mod orchestrator;
mod report;
mod resolver;
mod step;

pub use context::{ContextSummary, INITIAL_INPUT, LogEntry, WorkflowContext};
pub use error::{ContextError, ExecutionError, GraphError, ResolveError, StepError};
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use graph::DependencyGraph;
pub use node::{Node, NodeState, NodeStatus};
pub use orchestrator::{ExecutionResult, Orchestrator};
pub use report::{NodeSnapshot, StatusSnapshot};
pub use resolver::{InputResolver, WholeContextResolver};
pub use step::Step;
