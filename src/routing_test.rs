//! Tests for edge selection.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use crate::graph::CycleRule;
use crate::routing::{Edge, Target, select};
use crate::types::{RunFailure, RunState, StateValues};

fn state_with_iteration(iteration: u32, max_iterations: u32) -> RunState {
  let mut state = RunState::new(StateValues::new(), max_iterations);
  state.iteration = iteration;
  state
}

fn conditional(targets: &[(&str, &str)], cycle: Option<CycleRule>, label: &'static str) -> Edge {
  Edge::Conditional {
    router: Arc::new(move |_: &RunState| label.to_string()),
    targets: targets
      .iter()
      .map(|(l, t)| (l.to_string(), Target::parse(t)))
      .collect::<BTreeMap<_, _>>(),
    cycle,
  }
}

#[test]
fn static_edge_is_followed_unconditionally() {
  let edge = Edge::Static {
    target: Target::Node("next".to_string()),
  };
  let selection = select("a", &edge, &state_with_iteration(0, 1)).unwrap();
  assert_eq!(selection.target, Target::Node("next".to_string()));
  assert!(!selection.closed_cycle);
}

#[test]
fn conditional_edge_follows_the_returned_label() {
  let edge = conditional(
    &[("billing", "billing"), ("general", "general")],
    None,
    "billing",
  );
  let selection = select("classify", &edge, &state_with_iteration(0, 1)).unwrap();
  assert_eq!(selection.target, Target::Node("billing".to_string()));
}

#[test]
fn router_reads_the_state() {
  let edge = Edge::Conditional {
    router: Arc::new(|state: &RunState| {
      state.get_str("intent").unwrap_or("general").to_string()
    }),
    targets: [
      ("billing".to_string(), Target::Node("billing".to_string())),
      ("general".to_string(), Target::Node("general".to_string())),
    ]
    .into_iter()
    .collect(),
    cycle: None,
  };
  let mut values = StateValues::new();
  values.insert("intent".to_string(), json!("billing"));
  let state = RunState::new(values, 1);
  let selection = select("classify", &edge, &state).unwrap();
  assert_eq!(selection.target, Target::Node("billing".to_string()));
}

#[test]
fn undeclared_label_is_a_contract_violation() {
  let edge = conditional(&[("a", "node_a"), ("b", "node_b")], None, "c");
  let failure = select("route", &edge, &state_with_iteration(0, 1)).unwrap_err();
  assert_eq!(
    failure,
    RunFailure::UndeclaredLabel {
      node: "route".to_string(),
      label: "c".to_string(),
    }
  );
}

#[test]
fn closing_label_marks_the_cycle() {
  let cycle = CycleRule {
    closing_label: "continue".to_string(),
    exit_label: "done".to_string(),
  };
  let edge = conditional(
    &[("continue", "plan"), ("done", "__end__")],
    Some(cycle),
    "continue",
  );
  let selection = select("evaluate", &edge, &state_with_iteration(0, 2)).unwrap();
  assert_eq!(selection.target, Target::Node("plan".to_string()));
  assert!(selection.closed_cycle);
}

#[test]
fn exhausted_run_is_forced_to_the_exit_label() {
  let cycle = CycleRule {
    closing_label: "continue".to_string(),
    exit_label: "done".to_string(),
  };
  let edge = conditional(
    &[("continue", "plan"), ("done", "__end__")],
    Some(cycle),
    "continue",
  );
  let selection = select("evaluate", &edge, &state_with_iteration(2, 2)).unwrap();
  assert_eq!(selection.target, Target::End);
  assert!(!selection.closed_cycle);
}

#[test]
fn exhausted_run_still_fails_on_undeclared_labels() {
  let cycle = CycleRule {
    closing_label: "continue".to_string(),
    exit_label: "done".to_string(),
  };
  let edge = conditional(
    &[("continue", "plan"), ("done", "__end__")],
    Some(cycle),
    "nonsense",
  );
  let failure = select("evaluate", &edge, &state_with_iteration(2, 2)).unwrap_err();
  assert!(matches!(failure, RunFailure::UndeclaredLabel { .. }));
}

#[test]
fn non_closing_label_is_honored_even_when_exhausted() {
  let cycle = CycleRule {
    closing_label: "continue".to_string(),
    exit_label: "done".to_string(),
  };
  let edge = conditional(
    &[
      ("continue", "plan"),
      ("clarify", "clarify"),
      ("done", "__end__"),
    ],
    Some(cycle),
    "clarify",
  );
  let selection = select("evaluate", &edge, &state_with_iteration(2, 2)).unwrap();
  assert_eq!(selection.target, Target::Node("clarify".to_string()));
  assert!(!selection.closed_cycle);
}
