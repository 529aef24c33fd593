//! Run state machine: drives a compiled graph from entry to terminal.
//!
//! One run advances strictly sequentially: invoke the cursor node, merge
//! its update through the reducers, then select the next edge. Node
//! invocation is the only operation that may block; it runs under the
//! node's timeout and failure policy. Many runs may share one compiled
//! graph concurrently — each run owns its own state.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::compiler::CompiledGraph;
use crate::error::{RunError, StateError};
use crate::handler::{FailurePolicy, NodeError, NodeSpec};
use crate::reducer;
use crate::routing::{self, Target};
use crate::types::{
  Checkpoint, RunFailure, RunLog, RunOutcome, RunState, RunStatus, StateUpdate, StateValues,
  StepEntry,
};

/// Safety limit on executed nodes per run. The iteration ceiling bounds
/// declared cycles; this bounds everything else (a cycle nobody marked).
const MAX_STEPS: usize = 10_000;

/// Run creation knobs. `entry: None` uses the graph's declared entry.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
  pub entry: Option<String>,
  pub initial: StateValues,
  /// Hard ceiling on completed cycles, enforced by the executor.
  pub max_iterations: u32,
  /// Record a per-step log, retrievable via [Run::run_log].
  pub record_steps: bool,
}

/// One execution of a compiled graph.
#[derive(Debug)]
pub struct Run {
  graph: Arc<CompiledGraph>,
  state: RunState,
  status: RunStatus,
  cursor: String,
  /// Token of the pending checkpoint while suspended.
  pending: Option<Uuid>,
  completed_nodes: Vec<String>,
  steps: Option<Vec<StepEntry>>,
  started_at: Option<String>,
  finished_at: Option<String>,
}

impl Run {
  /// Creates a run in `Created` over a shared compiled graph. Initial
  /// values are kind-checked against the schema, with schema defaults for
  /// fields the caller leaves out.
  pub fn new(graph: Arc<CompiledGraph>, config: RunConfig) -> Result<Self, RunError> {
    let cursor = match config.entry {
      Some(entry) => {
        if !graph.contains_node(&entry) {
          return Err(RunError::UnknownEntry(entry));
        }
        entry
      }
      None => graph.entry().to_string(),
    };
    let values = reducer::initial_values(graph.schema(), &config.initial)?;
    Ok(Self {
      state: RunState::new(values, config.max_iterations),
      status: RunStatus::Created,
      cursor,
      pending: None,
      completed_nodes: vec![],
      steps: config.record_steps.then(Vec::new),
      started_at: None,
      finished_at: None,
      graph,
    })
  }

  /// Rebuilds a suspended run from a persisted checkpoint, so resume
  /// survives a process restart.
  pub fn from_checkpoint(
    graph: Arc<CompiledGraph>,
    checkpoint: Checkpoint,
  ) -> Result<Self, RunError> {
    if !graph.contains_node(&checkpoint.node) {
      return Err(RunError::UnknownCheckpointNode(checkpoint.node));
    }
    Ok(Self {
      state: RunState {
        values: checkpoint.values,
        iteration: checkpoint.iteration,
        max_iterations: checkpoint.max_iterations,
      },
      status: RunStatus::Suspended,
      cursor: checkpoint.node,
      pending: Some(checkpoint.token),
      completed_nodes: checkpoint.completed_nodes,
      steps: None,
      started_at: None,
      finished_at: None,
      graph,
    })
  }

  pub fn status(&self) -> RunStatus {
    self.status
  }

  pub fn state(&self) -> &RunState {
    &self.state
  }

  /// Current node the cursor points at.
  pub fn cursor(&self) -> &str {
    &self.cursor
  }

  /// Executed node names in order.
  pub fn completed_nodes(&self) -> &[String] {
    &self.completed_nodes
  }

  /// Step log assembled so far, when the run was configured to record one.
  pub fn run_log(&self) -> Option<RunLog> {
    let steps = self.steps.as_ref()?;
    Some(RunLog {
      version: 1,
      started_at: self.started_at.clone().unwrap_or_default(),
      finished_at: self.finished_at.clone(),
      final_status: self.status.to_string(),
      completed_nodes: self.completed_nodes.clone(),
      steps: steps.clone(),
    })
  }

  /// Starts a `Created` run and drives it until it completes, suspends, or
  /// fails. The outcome always carries state — a run never disappears
  /// silently.
  #[instrument(level = "trace", skip(self))]
  pub async fn start(&mut self) -> Result<RunOutcome, RunError> {
    if self.status != RunStatus::Created {
      return Err(RunError::AlreadyStarted(self.status));
    }
    self.status = RunStatus::Running;
    self.started_at = Some(chrono::Utc::now().to_rfc3339());
    info!(entry = %self.cursor, max_iterations = self.state.max_iterations, "run started");
    Ok(self.drive(true).await)
  }

  /// Resumes a `Suspended` run with externally supplied input, merged as
  /// if it were a node update. `token` must match the pending checkpoint;
  /// a repeated or stale resume is rejected without touching state, so
  /// duplicate deliveries can never double-merge.
  #[instrument(level = "trace", skip(self, input))]
  pub async fn resume(&mut self, token: Uuid, input: StateUpdate) -> Result<RunOutcome, RunError> {
    if self.status != RunStatus::Suspended {
      return Err(RunError::NotSuspended(self.status));
    }
    if self.pending != Some(token) {
      return Err(RunError::TokenMismatch);
    }
    // Merge before touching run status: a bad input leaves the run
    // suspended and retryable.
    let merged = reducer::merge(self.graph.schema(), &self.state.values, &input)?;
    self.state.values = merged;
    self.pending = None;
    self.status = RunStatus::Running;
    if self.started_at.is_none() {
      self.started_at = Some(chrono::Utc::now().to_rfc3339());
    }
    info!(node = %self.cursor, "run resumed");
    Ok(self.drive(false).await)
  }

  /// The step loop. `invoke_cursor` is false on the first pass after a
  /// resume, where the checkpoint node already ran before suspension and
  /// execution continues from its edge.
  async fn drive(&mut self, mut invoke_cursor: bool) -> RunOutcome {
    loop {
      let mut executed: Option<StateUpdate> = None;
      let mut values_before: Option<StateValues> = None;
      if invoke_cursor {
        if self.completed_nodes.len() >= MAX_STEPS {
          return self.fail(RunFailure::StepLimit {
            steps: self.completed_nodes.len() as u32,
          });
        }
        let spec = self.graph.node(&self.cursor).clone();
        let update = match self.invoke(&spec).await {
          Ok(update) => update,
          Err(err) => match &spec.on_failure {
            FailurePolicy::Recover(default) => {
              warn!(node = %self.cursor, error = %err, "node failed; recovering with default update");
              default.clone()
            }
            FailurePolicy::Fatal => {
              return self.fail(RunFailure::Node {
                node: self.cursor.clone(),
                message: err.to_string(),
              });
            }
          },
        };
        if let Some(writes) = &spec.writes {
          if let Some(field) = update.fields.keys().find(|field| !writes.contains(*field)) {
            let violation = StateError::UndeclaredWrite {
              node: self.cursor.clone(),
              field: field.clone(),
            };
            return self.fail(RunFailure::State {
              node: self.cursor.clone(),
              message: violation.to_string(),
            });
          }
        }
        if self.steps.is_some() {
          values_before = Some(self.state.values.clone());
        }
        match reducer::merge(self.graph.schema(), &self.state.values, &update) {
          Ok(next) => self.state.values = next,
          Err(err) => {
            return self.fail(RunFailure::State {
              node: self.cursor.clone(),
              message: err.to_string(),
            });
          }
        }
        self.completed_nodes.push(self.cursor.clone());
        if spec.is_checkpoint() {
          let checkpoint = Checkpoint {
            token: Uuid::new_v4(),
            node: self.cursor.clone(),
            values: self.state.values.clone(),
            iteration: self.state.iteration,
            max_iterations: self.state.max_iterations,
            completed_nodes: self.completed_nodes.clone(),
          };
          self.push_step(values_before, update, None);
          self.pending = Some(checkpoint.token);
          self.status = RunStatus::Suspended;
          info!(node = %self.cursor, token = %checkpoint.token, "run suspended at checkpoint");
          return RunOutcome::Suspended { checkpoint };
        }
        executed = Some(update);
      }

      let selected = {
        let edge = self.graph.edge(&self.cursor);
        routing::select(&self.cursor, edge, &self.state)
      };
      let selection = match selected {
        Ok(selection) => selection,
        Err(failure) => return self.fail(failure),
      };
      if selection.closed_cycle {
        self.state.iteration += 1;
        info!(
          node = %self.cursor,
          iteration = self.state.iteration,
          "cycle closed"
        );
      }
      let next = match &selection.target {
        Target::Node(name) => Some(name.clone()),
        Target::End => None,
      };
      if let Some(update) = executed {
        self.push_step(values_before, update, next.clone());
      }
      match next {
        Some(name) => {
          self.cursor = name;
          invoke_cursor = true;
        }
        None => {
          self.status = RunStatus::Terminal;
          self.finished_at = Some(chrono::Utc::now().to_rfc3339());
          info!(completed_nodes = ?self.completed_nodes, "run complete");
          return RunOutcome::Complete {
            state: self.state.values.clone(),
          };
        }
      }
    }
  }

  /// Invokes the cursor node under its timeout. An elapsed timeout cancels
  /// the handler and counts as a node error.
  async fn invoke(&self, spec: &NodeSpec) -> Result<StateUpdate, NodeError> {
    info!(node = %self.cursor, "executing node");
    match spec.timeout {
      Some(limit) => match tokio::time::timeout(limit, spec.handler.run(&self.state)).await {
        Ok(result) => result,
        Err(_) => Err(NodeError::Timeout(limit)),
      },
      None => spec.handler.run(&self.state).await,
    }
  }

  fn fail(&mut self, failure: RunFailure) -> RunOutcome {
    self.status = RunStatus::Failed;
    self.finished_at = Some(chrono::Utc::now().to_rfc3339());
    warn!(%failure, "run failed");
    RunOutcome::Failed {
      failure,
      state: self.state.values.clone(),
    }
  }

  fn push_step(&mut self, values_before: Option<StateValues>, update: StateUpdate, next: Option<String>) {
    let Some(steps) = &mut self.steps else {
      return;
    };
    let Some(values_before) = values_before else {
      return;
    };
    steps.push(StepEntry {
      step: steps.len() as u32 + 1,
      node: self.cursor.clone(),
      values_before,
      update,
      values_after: self.state.values.clone(),
      next,
      iteration_after: self.state.iteration,
    });
  }
}
