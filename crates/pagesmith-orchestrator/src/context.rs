//! Run-scoped context shared between nodes.
//!
//! The context holds one output per node plus the initial input, and an
//! append-only log of execution events. Its key space is fixed when the run
//! starts: asking for a key that is neither a registered node nor
//! [`INITIAL_INPUT`] is an error, not a silent miss.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ContextError, ResolveError};
use crate::node::NodeStatus;

/// Reserved key holding the run's initial input.
pub const INITIAL_INPUT: &str = "initial_input";

/// Number of log entries kept in a [`ContextSummary`].
const SUMMARY_LOG_TAIL: usize = 5;

/// One entry in the execution log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub node: String,
  pub status: NodeStatus,
  pub message: String,
}

/// Condensed view of a context for status reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
  pub execution_id: String,
  pub total_steps: usize,
  pub data_keys: Vec<String>,
  pub execution_log: Vec<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct WorkflowContext {
  execution_id: String,
  allowed: HashSet<String>,
  values: HashMap<String, Value>,
  /// Keys in the order they were written.
  written: Vec<String>,
  log: Vec<LogEntry>,
}

impl WorkflowContext {
  pub(crate) fn new<I>(execution_id: String, node_names: I, initial_input: Value) -> Self
  where
    I: IntoIterator<Item = String>,
  {
    let mut allowed: HashSet<String> = node_names.into_iter().collect();
    allowed.insert(INITIAL_INPUT.to_string());

    let mut values = HashMap::new();
    values.insert(INITIAL_INPUT.to_string(), initial_input);

    Self {
      execution_id,
      allowed,
      values,
      written: vec![INITIAL_INPUT.to_string()],
      log: Vec::new(),
    }
  }

  pub fn execution_id(&self) -> &str {
    &self.execution_id
  }

  /// Look up a value.
  ///
  /// `Ok(None)` means the key is known but nothing has been stored yet.
  pub fn get(&self, key: &str) -> Result<Option<&Value>, ContextError> {
    if !self.allowed.contains(key) {
      return Err(ContextError::UnknownKey {
        key: key.to_string(),
      });
    }
    Ok(self.values.get(key))
  }

  /// Look up the output `node` needs from `dependency`, failing if it is absent.
  pub fn upstream(&self, node: &str, dependency: &str) -> Result<&Value, ResolveError> {
    self
      .get(dependency)?
      .ok_or_else(|| ResolveError::MissingOutput {
        node: node.to_string(),
        dependency: dependency.to_string(),
      })
  }

  /// Whether a value has been stored under `key`.
  pub fn contains(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  pub fn initial_input(&self) -> &Value {
    // Seeded in `new` and never removed.
    self.values.get(INITIAL_INPUT).unwrap_or(&Value::Null)
  }

  /// Populated keys in write order.
  pub fn keys(&self) -> &[String] {
    &self.written
  }

  /// Populated entries in write order.
  pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
    self
      .written
      .iter()
      .filter_map(|key| self.values.get(key).map(|v| (key.as_str(), v)))
  }

  /// All populated entries as one JSON object.
  pub fn to_json(&self) -> Value {
    Value::Object(
      self
        .entries()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect(),
    )
  }

  pub fn log_entries(&self) -> &[LogEntry] {
    &self.log
  }

  pub fn summary(&self) -> ContextSummary {
    let tail = self.log.len().saturating_sub(SUMMARY_LOG_TAIL);
    ContextSummary {
      execution_id: self.execution_id.clone(),
      total_steps: self.log.len(),
      data_keys: self.written.clone(),
      execution_log: self.log[tail..].to_vec(),
    }
  }

  pub(crate) fn insert(&mut self, key: &str, value: Value) -> Result<(), ContextError> {
    if !self.allowed.contains(key) {
      return Err(ContextError::UnknownKey {
        key: key.to_string(),
      });
    }
    if self.values.contains_key(key) {
      return Err(ContextError::AlreadySet {
        key: key.to_string(),
      });
    }
    self.values.insert(key.to_string(), value);
    self.written.push(key.to_string());
    Ok(())
  }

  pub(crate) fn log(&mut self, node: &str, status: NodeStatus, message: impl Into<String>) {
    self.log.push(LogEntry {
      timestamp: Utc::now(),
      node: node.to_string(),
      status,
      message: message.into(),
    });
  }
}
