//! Capability-backed node: external call plus structured-output decoding.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::capability::{Capability, decode_structured};
use crate::handler::{NodeError, NodeHandler};
use crate::types::{RunState, StateUpdate};

type ArgsFn = dyn Fn(&RunState) -> Value + Send + Sync;
type DecodeFn = dyn Fn(&Value) -> Option<StateUpdate> + Send + Sync;

/// Node body that calls an external capability and decodes its structured
/// output into a partial update.
///
/// Malformed output — text that does not decode as JSON, or a shape the
/// `decode` function rejects — degrades to the configured fallback update
/// so one unparsable answer does not stop the whole run. An outright call
/// failure surfaces as [NodeError::Capability] and follows the node's
/// failure policy.
pub struct CapabilityNode {
  capability: Arc<dyn Capability>,
  args: Box<ArgsFn>,
  decode: Box<DecodeFn>,
  fallback: StateUpdate,
}

impl CapabilityNode {
  /// `args` builds the request from the run state; `decode` maps decoded
  /// JSON to an update (returning `None` for shapes it cannot use);
  /// `fallback` is the documented default update for malformed output.
  pub fn new<A, D>(capability: Arc<dyn Capability>, args: A, decode: D, fallback: StateUpdate) -> Self
  where
    A: Fn(&RunState) -> Value + Send + Sync + 'static,
    D: Fn(&Value) -> Option<StateUpdate> + Send + Sync + 'static,
  {
    Self {
      capability,
      args: Box::new(args),
      decode: Box::new(decode),
      fallback,
    }
  }
}

#[async_trait]
impl NodeHandler for CapabilityNode {
  async fn run(&self, state: &RunState) -> Result<StateUpdate, NodeError> {
    let args = (self.args)(state);
    let raw = self
      .capability
      .call(args)
      .await
      .map_err(|e| NodeError::Capability(e.to_string()))?;
    match decode_structured(&raw) {
      Ok(value) => match (self.decode)(&value) {
        Some(update) => Ok(update),
        None => {
          warn!("structured output shape rejected; using fallback update");
          Ok(self.fallback.clone())
        }
      },
      Err(e) => {
        warn!(error = %e, "structured output did not decode; using fallback update");
        Ok(self.fallback.clone())
      }
    }
  }
}
