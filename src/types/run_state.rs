//! Shared state threaded through one run.

use serde_json::Value;

use super::StateValues;

/// State for one run: declared field values plus the two control fields
/// owned by the executor, kept outside the field map so no node update can
/// touch them.
#[derive(Debug, Clone)]
pub struct RunState {
  pub values: StateValues,
  /// Completed cycle count; bumped by the executor once per traversal of a
  /// declared cycle-closing edge.
  pub iteration: u32,
  /// Immutable iteration ceiling from the run configuration.
  pub max_iterations: u32,
}

impl RunState {
  pub fn new(values: StateValues, max_iterations: u32) -> Self {
    Self {
      values,
      iteration: 0,
      max_iterations,
    }
  }

  pub fn get(&self, field: &str) -> Option<&Value> {
    self.values.get(field)
  }

  /// String accessor; `None` when absent or not a string.
  pub fn get_str(&self, field: &str) -> Option<&str> {
    self.values.get(field).and_then(Value::as_str)
  }

  /// Bool accessor; `None` when absent or not a bool.
  pub fn get_bool(&self, field: &str) -> Option<bool> {
    self.values.get(field).and_then(Value::as_bool)
  }

  /// True once the iteration ceiling has been reached.
  pub fn exhausted(&self) -> bool {
    self.iteration >= self.max_iterations
  }
}
