//! Error types for graph compilation and the run API.
//!
//! Fatal failures *inside* a run are not errors in the `Result` sense; they
//! are classified on [RunFailure](crate::types::RunFailure) and returned as
//! part of the outcome together with the last good state.

use thiserror::Error;

use crate::types::{FieldKind, RunStatus};

/// Rejected graph definition (compile-time).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
  #[error("duplicate node `{0}`")]
  DuplicateNode(String),
  #[error("graph has no entry node")]
  MissingEntry,
  #[error("entry node `{0}` is not declared")]
  UnknownEntry(String),
  #[error("edge declared on undeclared node `{0}`")]
  UnknownEdgeSource(String),
  #[error("edge from `{from}` targets undeclared node `{to}`")]
  DanglingTarget { from: String, to: String },
  #[error("conditional edge on `{node}` routes label `{label}` to undeclared node `{to}`")]
  DanglingLabel {
    node: String,
    label: String,
    to: String,
  },
  #[error("conditional edge on `{node}` declares label `{label}` twice")]
  DuplicateLabel { node: String, label: String },
  #[error("node `{0}` declares more than one outgoing edge")]
  ConflictingEdges(String),
  #[error("node `{0}` has no outgoing edge")]
  MissingEdge(String),
  #[error("cycle rule on `{node}` names undeclared label `{label}`")]
  UnknownCycleLabel { node: String, label: String },
  #[error("cycle rule on `{0}` requires a conditional edge")]
  CycleWithoutConditional(String),
  #[error("field name `{0}` is reserved for the executor")]
  ReservedField(String),
  #[error("node `{node}` declares undeclared field `{field}`")]
  UndeclaredField { node: String, field: String },
}

/// State-contract violation while merging an update.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
  #[error("update touches undeclared field `{0}`")]
  UnknownField(String),
  #[error("field `{field}` expects a {expected} value")]
  KindMismatch { field: String, expected: FieldKind },
  #[error("accumulating field `{0}` takes a list fragment")]
  NotAList(String),
  #[error("field `{0}` does not accept reset updates")]
  ResetNotAllowed(String),
  #[error("node `{node}` is not declared to update `{field}`")]
  UndeclaredWrite { node: String, field: String },
}

/// Caller misuse of the run API; the run's state is unchanged.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("run already started (status: {0})")]
  AlreadyStarted(RunStatus),
  #[error("run is not suspended (status: {0})")]
  NotSuspended(RunStatus),
  #[error("resume token does not match the pending checkpoint")]
  TokenMismatch,
  #[error("entry node `{0}` is not declared in this graph")]
  UnknownEntry(String),
  #[error("checkpoint node `{0}` is not declared in this graph")]
  UnknownCheckpointNode(String),
  #[error(transparent)]
  State(#[from] StateError),
}
