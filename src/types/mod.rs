//! Data types for graph definitions, run state, and run results.
//!
//! Logic lives in the root modules (`reducer`, `compiler`, `routing`,
//! `runner`); these files hold the plain data the engine moves around.

use std::collections::HashMap;

use serde_json::Value;

mod checkpoint;
mod field_spec;
mod run_failure;
mod run_log;
mod run_outcome;
mod run_state;
#[cfg(test)]
mod run_state_test;
mod run_status;
mod schema;
#[cfg(test)]
mod schema_test;
mod state_update;

pub use checkpoint::Checkpoint;
pub use field_spec::{FieldKind, FieldSpec, MergeRule};
pub use run_failure::RunFailure;
pub use run_log::{RunLog, StepEntry};
pub use run_outcome::RunOutcome;
pub use run_state::RunState;
pub use run_status::RunStatus;
pub(crate) use schema::RESERVED_FIELDS;
pub use schema::StateSchema;
pub use state_update::{FieldPatch, StateUpdate};

/// Field name → value mapping for the declared state fields.
pub type StateValues = HashMap<String, Value>;
