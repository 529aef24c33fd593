//! DTOs for run.log.json: per-step record of a run for debugging.
//!
//! Assembled from the values and [StateUpdate](super::StateUpdate)s seen by
//! the executor, one entry per executed node.

use serde::{Deserialize, Serialize};

use super::{StateUpdate, StateValues};

/// One recorded step of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEntry {
  /// 1-based step index.
  pub step: u32,
  /// Node that was executed.
  pub node: String,
  /// Values before the node's update was merged.
  pub values_before: StateValues,
  /// The partial update the node returned (or the recovery default).
  pub update: StateUpdate,
  /// Values after the merge.
  pub values_after: StateValues,
  /// Next node selected by the edge table (`None` when the run stopped
  /// here: suspension or the end sentinel).
  pub next: Option<String>,
  /// Cycle counter after this step's routing.
  pub iteration_after: u32,
}

/// Root structure for run.log.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLog {
  /// Log format version.
  pub version: u32,
  /// ISO 8601 timestamp when the run started.
  pub started_at: String,
  /// ISO 8601 timestamp when the run finished (None if still running or
  /// suspended).
  pub finished_at: Option<String>,
  /// Run status when the log was assembled (e.g. "terminal", "suspended").
  pub final_status: String,
  /// Node names completed so far, in execution order.
  pub completed_nodes: Vec<String>,
  /// Recorded steps in order.
  pub steps: Vec<StepEntry>,
}
