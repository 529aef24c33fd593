//! Tests for `RunState`.

use serde_json::json;

use super::{RunState, StateValues};

fn state_with(values: &[(&str, serde_json::Value)], max_iterations: u32) -> RunState {
  let values: StateValues = values
    .iter()
    .map(|(k, v)| (k.to_string(), v.clone()))
    .collect();
  RunState::new(values, max_iterations)
}

#[test]
fn typed_accessors() {
  let state = state_with(
    &[("intent", json!("billing")), ("done", json!(true))],
    3,
  );
  assert_eq!(state.get_str("intent"), Some("billing"));
  assert_eq!(state.get_bool("done"), Some(true));
  assert_eq!(state.get_str("done"), None);
  assert_eq!(state.get("missing"), None);
}

#[test]
fn exhausted_tracks_the_ceiling() {
  let mut state = state_with(&[], 2);
  assert!(!state.exhausted());
  state.iteration = 1;
  assert!(!state.exhausted());
  state.iteration = 2;
  assert!(state.exhausted());
}

#[test]
fn zero_ceiling_is_exhausted_from_the_start() {
  let state = state_with(&[], 0);
  assert!(state.exhausted());
}
