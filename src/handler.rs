//! Node contract: the handler trait plus per-node execution policy.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::nodes::FnNode;
use crate::types::{RunState, StateUpdate};

/// Failure surfaced by a node handler to the executor.
#[derive(Debug, Clone, Error)]
pub enum NodeError {
  #[error("capability call failed: {0}")]
  Capability(String),
  #[error("node timed out after {0:?}")]
  Timeout(Duration),
  #[error("{0}")]
  Failed(String),
}

/// A unit of work: reads the run state, returns a partial update naming
/// only the fields it changes.
///
/// Handlers are stateless between invocations and must not mutate the state
/// they receive; the executor merges the returned update through the
/// declared reducers. This keeps node logic testable in isolation: supply a
/// state, assert the returned update.
#[async_trait]
pub trait NodeHandler: Send + Sync {
  async fn run(&self, state: &RunState) -> Result<StateUpdate, NodeError>;
}

/// What the executor does when a node handler fails or times out.
#[derive(Debug, Clone)]
pub enum FailurePolicy {
  /// The failure is fatal for the run. Default; right for nodes whose
  /// output is required to proceed.
  Fatal,
  /// Absorb the failure and continue with this default update. For
  /// advisory nodes where a low-confidence placeholder is safe.
  Recover(StateUpdate),
}

/// One registered node: handler plus execution policy.
#[derive(Clone)]
pub struct NodeSpec {
  pub(crate) handler: Arc<dyn NodeHandler>,
  pub(crate) checkpoint: bool,
  pub(crate) timeout: Option<Duration>,
  pub(crate) on_failure: FailurePolicy,
  pub(crate) reads: Vec<String>,
  pub(crate) writes: Option<Vec<String>>,
}

impl NodeSpec {
  pub fn new(handler: impl NodeHandler + 'static) -> Self {
    Self {
      handler: Arc::new(handler),
      checkpoint: false,
      timeout: None,
      on_failure: FailurePolicy::Fatal,
      reads: vec![],
      writes: None,
    }
  }

  /// Registers a plain closure as the node body.
  pub fn from_fn<F>(f: F) -> Self
  where
    F: Fn(&RunState) -> Result<StateUpdate, NodeError> + Send + Sync + 'static,
  {
    Self::new(FnNode::new(f))
  }

  /// Marks this node as a suspension checkpoint: the run pauses after its
  /// update is merged and waits for externally supplied input.
  pub fn checkpoint(mut self) -> Self {
    self.checkpoint = true;
    self
  }

  /// Caller-supplied ceiling on one invocation; elapsed time cancels the
  /// handler and counts as a node error under the failure policy.
  pub fn timeout(mut self, limit: Duration) -> Self {
    self.timeout = Some(limit);
    self
  }

  pub fn on_failure(mut self, policy: FailurePolicy) -> Self {
    self.on_failure = policy;
    self
  }

  /// Fields this node reads. Informational; validated against the schema.
  pub fn reads<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.reads = fields.into_iter().map(Into::into).collect();
    self
  }

  /// Fields this node may update. Enforced: once declared, an update
  /// touching any other field fails the run.
  pub fn writes<I, S>(mut self, fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.writes = Some(fields.into_iter().map(Into::into).collect());
    self
  }

  pub fn is_checkpoint(&self) -> bool {
    self.checkpoint
  }
}

impl fmt::Debug for NodeSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NodeSpec")
      .field("checkpoint", &self.checkpoint)
      .field("timeout", &self.timeout)
      .field("reads", &self.reads)
      .field("writes", &self.writes)
      .finish_non_exhaustive()
  }
}
