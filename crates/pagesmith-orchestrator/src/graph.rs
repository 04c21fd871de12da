use std::collections::HashMap;

use crate::error::GraphError;
use crate::node::Node;

/// Traversal marks for the depth-first sort. Absent means unvisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  InProgress,
  Done,
}

/// Borrowed view of the dependency graph used for ordering.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
  /// Node names in registration order.
  names: Vec<&'a str>,
  /// node -> declared dependencies.
  dependencies: HashMap<&'a str, &'a [String]>,
}

impl<'a> DependencyGraph<'a> {
  /// Build a graph from `(name, dependencies)` pairs in registration order.
  pub fn new<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = (&'a str, &'a [String])>,
  {
    let mut names = Vec::new();
    let mut dependencies = HashMap::new();

    for (name, deps) in entries {
      names.push(name);
      dependencies.insert(name, deps);
    }

    Self {
      names,
      dependencies,
    }
  }

  pub(crate) fn from_nodes(nodes: &'a [Node]) -> Self {
    Self::new(nodes.iter().map(|n| (n.name(), n.dependencies())))
  }

  /// Compute a topological order.
  ///
  /// Roots are taken in registration order and dependencies in declared
  /// order, so the result is deterministic. Every node appears after all of
  /// its dependencies.
  pub fn topological_order(&self) -> Result<Vec<String>, GraphError> {
    let mut marks: HashMap<&'a str, Mark> = HashMap::with_capacity(self.names.len());
    let mut order = Vec::with_capacity(self.names.len());

    for &name in &self.names {
      if !marks.contains_key(name) {
        self.visit(name, &mut marks, &mut order)?;
      }
    }

    Ok(order)
  }

  fn visit(
    &self,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    order: &mut Vec<String>,
  ) -> Result<(), GraphError> {
    match marks.get(name) {
      Some(Mark::Done) => return Ok(()),
      Some(Mark::InProgress) => {
        return Err(GraphError::CycleDetected {
          node: name.to_string(),
        });
      }
      None => {}
    }

    marks.insert(name, Mark::InProgress);

    let deps: &'a [String] = self.dependencies.get(name).copied().unwrap_or(&[]);
    for dep in deps {
      if !self.dependencies.contains_key(dep.as_str()) {
        return Err(GraphError::MissingDependency {
          node: name.to_string(),
          dependency: dep.clone(),
        });
      }
      self.visit(dep.as_str(), marks, order)?;
    }

    marks.insert(name, Mark::Done);
    order.push(name.to_string());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn owned(graph: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    graph
      .iter()
      .map(|(n, deps)| (n.to_string(), deps.iter().map(|d| d.to_string()).collect()))
      .collect()
  }

  fn order(graph: &[(&str, &[&str])]) -> Result<Vec<String>, GraphError> {
    let entries = owned(graph);
    DependencyGraph::new(entries.iter().map(|(n, d)| (n.as_str(), d.as_slice())))
      .topological_order()
  }

  fn position(order: &[String], name: &str) -> usize {
    order.iter().position(|n| n == name).unwrap()
  }

  #[test]
  fn test_diamond_registered_out_of_order() {
    let result = order(&[("a", &[]), ("d", &["b", "c"]), ("b", &["a"]), ("c", &["a"])]).unwrap();

    assert_eq!(result, ["a", "b", "c", "d"]);
  }

  #[test]
  fn test_independent_roots_keep_registration_order() {
    let result = order(&[("z", &[]), ("m", &[]), ("a", &[])]).unwrap();
    assert_eq!(result, ["z", "m", "a"]);
  }

  #[test]
  fn test_every_node_follows_its_dependencies() {
    let graph: &[(&str, &[&str])] = &[
      ("render", &["questions", "blocks"]),
      ("questions", &["parse"]),
      ("blocks", &["parse"]),
      ("parse", &[]),
      ("page", &["blocks"]),
      ("report", &["render", "page"]),
    ];
    let result = order(graph).unwrap();

    assert_eq!(result.len(), graph.len());
    for (name, deps) in graph {
      for dep in *deps {
        assert!(position(&result, dep) < position(&result, name), "{dep} before {name}");
      }
    }
  }

  #[test]
  fn test_two_node_cycle() {
    let err = order(&[("a", &["b"]), ("b", &["a"])]).unwrap_err();
    assert_eq!(
      err,
      GraphError::CycleDetected {
        node: "a".to_string()
      }
    );
  }

  #[test]
  fn test_self_dependency_is_a_cycle() {
    let err = order(&[("a", &["a"])]).unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected { node } if node == "a"));
  }

  #[test]
  fn test_longer_cycle_behind_valid_prefix() {
    let err =
      order(&[("root", &[]), ("x", &["root", "z"]), ("y", &["x"]), ("z", &["y"])]).unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected { node } if node == "x"));
  }

  #[test]
  fn test_missing_dependency_names_both_nodes() {
    let err = order(&[("a", &[]), ("b", &["a", "ghost"])]).unwrap_err();
    assert_eq!(
      err,
      GraphError::MissingDependency {
        node: "b".to_string(),
        dependency: "ghost".to_string(),
      }
    );
  }

  #[test]
  fn test_empty_graph() {
    assert!(order(&[]).unwrap().is_empty());
  }
}
