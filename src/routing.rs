//! Next-edge selection: static targets, conditional routing, cycle ceiling.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::graph::{CycleRule, END};
use crate::types::{RunFailure, RunState};

/// Routing function of a conditional edge. Side-effect-free; must return
/// one of the edge's declared labels.
pub(crate) type Router = Arc<dyn Fn(&RunState) -> String + Send + Sync>;

/// Resolved edge target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
  Node(String),
  End,
}

impl Target {
  pub(crate) fn parse(raw: &str) -> Self {
    if raw == END {
      Target::End
    } else {
      Target::Node(raw.to_string())
    }
  }
}

/// Compiled outgoing edge of one node.
pub(crate) enum Edge {
  Static {
    target: Target,
  },
  Conditional {
    router: Router,
    targets: BTreeMap<String, Target>,
    cycle: Option<CycleRule>,
  },
}

impl std::fmt::Debug for Edge {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Edge::Static { target } => f.debug_struct("Static").field("target", target).finish(),
      Edge::Conditional { targets, cycle, .. } => f
        .debug_struct("Conditional")
        .field("router", &"<Router>")
        .field("targets", targets)
        .field("cycle", cycle)
        .finish(),
    }
  }
}

/// Outcome of one routing decision.
#[derive(Debug)]
pub(crate) struct Selection {
  pub target: Target,
  /// True when the traversal followed the declared cycle-closing label.
  pub closed_cycle: bool,
}

/// Selects the next target after `node`.
///
/// The iteration ceiling is enforced here, not trusted to graph authors: at
/// a cycle-marked edge of an exhausted run, a closing-label result is
/// overridden to the declared exit label. The router is still consulted
/// first so that an undeclared label stays a fatal contract violation
/// rather than being masked by the ceiling.
#[instrument(level = "trace", skip(edge, state))]
pub(crate) fn select(node: &str, edge: &Edge, state: &RunState) -> Result<Selection, RunFailure> {
  match edge {
    Edge::Static { target } => Ok(Selection {
      target: target.clone(),
      closed_cycle: false,
    }),
    Edge::Conditional {
      router,
      targets,
      cycle,
    } => {
      let label = router(state);
      if !targets.contains_key(&label) {
        return Err(RunFailure::UndeclaredLabel {
          node: node.to_string(),
          label,
        });
      }
      let mut chosen = label;
      if let Some(rule) = cycle {
        if state.exhausted() && chosen == rule.closing_label {
          info!(
            node,
            iteration = state.iteration,
            max_iterations = state.max_iterations,
            "iteration ceiling reached; forcing exit label"
          );
          chosen = rule.exit_label.clone();
        }
      }
      let closed_cycle = cycle
        .as_ref()
        .is_some_and(|rule| rule.closing_label == chosen);
      Ok(Selection {
        target: targets[&chosen].clone(),
        closed_cycle,
      })
    }
  }
}
