//! Final result of driving a run.

use super::{Checkpoint, RunFailure, StateValues};

/// What the caller gets back from starting or resuming a run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
  /// The cursor reached the end sentinel; final state attached.
  Complete { state: StateValues },
  /// A checkpoint node paused the run; resume with the checkpoint token.
  Suspended { checkpoint: Checkpoint },
  /// Fatal contract violation; classification plus the last good state.
  Failed {
    failure: RunFailure,
    state: StateValues,
  },
}

impl RunOutcome {
  pub fn is_complete(&self) -> bool {
    matches!(self, RunOutcome::Complete { .. })
  }

  pub fn is_suspended(&self) -> bool {
    matches!(self, RunOutcome::Suspended { .. })
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, RunOutcome::Failed { .. })
  }

  /// State carried by the outcome, whichever variant it is.
  pub fn state(&self) -> &StateValues {
    match self {
      RunOutcome::Complete { state } => state,
      RunOutcome::Suspended { checkpoint } => &checkpoint.values,
      RunOutcome::Failed { state, .. } => state,
    }
  }
}
