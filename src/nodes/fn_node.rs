//! Closure-backed node handler.

use async_trait::async_trait;

use crate::handler::{NodeError, NodeHandler};
use crate::types::{RunState, StateUpdate};

/// Wraps a plain function as a node body. The common case for pure
/// transforms that read state and compute an update without external calls.
pub struct FnNode<F> {
  f: F,
}

impl<F> FnNode<F>
where
  F: Fn(&RunState) -> Result<StateUpdate, NodeError> + Send + Sync,
{
  pub fn new(f: F) -> Self {
    Self { f }
  }
}

#[async_trait]
impl<F> NodeHandler for FnNode<F>
where
  F: Fn(&RunState) -> Result<StateUpdate, NodeError> + Send + Sync,
{
  async fn run(&self, state: &RunState) -> Result<StateUpdate, NodeError> {
    (self.f)(state)
  }
}
