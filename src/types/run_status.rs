//! Lifecycle status of a run.

use std::fmt;

/// Lifecycle of a run: `Created → Running → {Suspended, Terminal, Failed}`;
/// `Suspended → Running` on resume; no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  Created,
  Running,
  Suspended,
  Terminal,
  Failed,
}

impl RunStatus {
  /// True for the two end states.
  pub fn is_final(&self) -> bool {
    matches!(self, RunStatus::Terminal | RunStatus::Failed)
  }
}

impl fmt::Display for RunStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RunStatus::Created => write!(f, "created"),
      RunStatus::Running => write!(f, "running"),
      RunStatus::Suspended => write!(f, "suspended"),
      RunStatus::Terminal => write!(f, "terminal"),
      RunStatus::Failed => write!(f, "failed"),
    }
  }
}
