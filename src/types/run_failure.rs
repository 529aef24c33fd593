//! Classification of a fatal run failure.

use std::fmt;

use serde::Serialize;

/// Why a run transitioned to `Failed`. Attached to the outcome together
/// with the last good state, so a run never disappears silently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunFailure {
  /// A node handler failed (or timed out) under a fatal failure policy.
  Node { node: String, message: String },
  /// A routing function returned a label missing from its declared map.
  /// Guessing a target instead could send the run down a wrong branch
  /// invisibly, so this is never defaulted.
  UndeclaredLabel { node: String, label: String },
  /// A node update violated the state contract.
  State { node: String, message: String },
  /// The run executed more steps than the safety limit allows — an
  /// unbounded cycle with no declared cycle rule.
  StepLimit { steps: u32 },
}

impl fmt::Display for RunFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunFailure::Node { node, message } => write!(f, "node `{node}` failed: {message}"),
      RunFailure::UndeclaredLabel { node, label } => {
        write!(f, "routing after `{node}` returned undeclared label `{label}`")
      }
      RunFailure::State { node, message } => {
        write!(f, "update from `{node}` violated the state contract: {message}")
      }
      RunFailure::StepLimit { steps } => {
        write!(f, "run exceeded the step safety limit ({steps} steps)")
      }
    }
  }
}
