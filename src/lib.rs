//! # stategraph
//!
//! Stateful directed-graph execution engine: named nodes read a shared,
//! schema-declared state and return partial updates; static and conditional
//! edges connect them; cycles are bounded by an executor-enforced iteration
//! ceiling; checkpoint nodes suspend a run until external input arrives.
//!
//! ## Architecture
//!
//! [GraphBuilder] collects the definition (state schema, nodes, edges,
//! entry); [GraphBuilder::compile] validates it into an immutable
//! [CompiledGraph] that many concurrent [Run]s may share read-only. A run
//! advances strictly sequentially: invoke the cursor node, merge its update
//! through the declared reducers ([reducer::merge]), select the next edge,
//! repeat until the [END] sentinel, a checkpoint suspension, or a fatal
//! contract violation.
//!
//! External capabilities (model completions, search, calculation) enter
//! through the [Capability] trait; [nodes::CapabilityNode] wraps a call
//! with fence-tolerant structured decoding and a documented default update
//! for malformed output.

pub mod capability;
pub mod checkpoint_io;
pub mod compiler;
pub mod error;
pub mod graph;
pub mod handler;
pub mod nodes;
pub mod reducer;
#[cfg(test)]
mod reducer_test;
pub(crate) mod routing;
#[cfg(test)]
mod routing_test;
pub mod run_log_io;
pub mod runner;
pub mod types;

pub use capability::{Capability, CapabilityError, decode_structured, strip_fence};
pub use compiler::CompiledGraph;
pub use error::{CompileError, RunError, StateError};
pub use graph::{END, GraphBuilder};
pub use handler::{FailurePolicy, NodeError, NodeHandler, NodeSpec};
pub use nodes::{CapabilityNode, FnNode};
pub use runner::{Run, RunConfig};
pub use types::{
  Checkpoint, FieldKind, FieldPatch, FieldSpec, MergeRule, RunFailure, RunLog, RunOutcome,
  RunState, RunStatus, StateSchema, StateUpdate, StateValues, StepEntry,
};
