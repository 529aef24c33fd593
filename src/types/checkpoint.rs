//! Suspension checkpoint: a pause point awaiting external input.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StateValues;

/// Pause point of a suspended run. The token must accompany the resume
/// call; one resume per suspension. Serializable so suspension can outlive
/// the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
  /// Resume token for this suspension.
  pub token: Uuid,
  /// Checkpoint node where the run paused; resume continues from the edge
  /// following it.
  pub node: String,
  pub values: StateValues,
  pub iteration: u32,
  pub max_iterations: u32,
  pub completed_nodes: Vec<String>,
}
