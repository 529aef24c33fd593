//! Tests for the reducer.

use proptest::prelude::*;
use serde_json::{Value, json};

use crate::error::StateError;
use crate::reducer::{initial_values, merge};
use crate::types::{FieldKind, StateSchema, StateUpdate, StateValues};

fn schema() -> StateSchema {
  StateSchema::new()
    .field("intent", FieldKind::String)
    .field("confidence", FieldKind::Number)
    .field("needs_more", FieldKind::Bool)
    .accumulating("log")
    .accumulating_resettable("feedback")
}

fn start() -> StateValues {
  schema().default_values()
}

#[test]
fn overwrite_replaces_and_leaves_the_rest() {
  let current = start();
  let update = StateUpdate::new().set("intent", "billing");
  let next = merge(&schema(), &current, &update).unwrap();
  assert_eq!(next.get("intent"), Some(&json!("billing")));
  assert_eq!(next.get("confidence"), Some(&json!(0)));
  assert_eq!(next.get("log"), Some(&json!([])));
}

#[test]
fn append_concatenates_in_arrival_order() {
  let s = schema();
  let current = start();
  let first = StateUpdate::new().append("log", vec![json!("a"), json!("b")]);
  let second = StateUpdate::new().append("log", vec![json!("c")]);
  let mid = merge(&s, &current, &first).unwrap();
  let next = merge(&s, &mid, &second).unwrap();
  assert_eq!(next.get("log"), Some(&json!(["a", "b", "c"])));
}

#[test]
fn append_permits_duplicates() {
  let s = schema();
  let update = StateUpdate::new().append("log", vec![json!("x"), json!("x")]);
  let next = merge(&s, &start(), &update).unwrap();
  assert_eq!(next.get("log"), Some(&json!(["x", "x"])));
}

#[test]
fn empty_fragment_is_a_no_op() {
  let s = schema();
  let mid = merge(
    &s,
    &start(),
    &StateUpdate::new().append("log", vec![json!("a")]),
  )
  .unwrap();
  let next = merge(&s, &mid, &StateUpdate::new().append("log", vec![])).unwrap();
  assert_eq!(next, mid);
}

#[test]
fn non_list_fragment_is_a_violation() {
  let err = merge(&schema(), &start(), &StateUpdate::new().set("log", "oops")).unwrap_err();
  assert_eq!(err, StateError::NotAList("log".to_string()));
}

#[test]
fn unknown_field_is_rejected() {
  let err = merge(&schema(), &start(), &StateUpdate::new().set("typo", 1)).unwrap_err();
  assert_eq!(err, StateError::UnknownField("typo".to_string()));
}

#[test]
fn kind_mismatch_is_rejected() {
  let err = merge(
    &schema(),
    &start(),
    &StateUpdate::new().set("confidence", "high"),
  )
  .unwrap_err();
  assert_eq!(
    err,
    StateError::KindMismatch {
      field: "confidence".to_string(),
      expected: FieldKind::Number,
    }
  );
}

#[test]
fn reset_truncates_resettable_fields() {
  let s = schema();
  let mid = merge(
    &s,
    &start(),
    &StateUpdate::new().append("feedback", vec![json!("too long")]),
  )
  .unwrap();
  let next = merge(&s, &mid, &StateUpdate::new().reset("feedback")).unwrap();
  assert_eq!(next.get("feedback"), Some(&json!([])));
}

#[test]
fn reset_is_rejected_elsewhere() {
  let s = schema();
  let err = merge(&s, &start(), &StateUpdate::new().reset("log")).unwrap_err();
  assert_eq!(err, StateError::ResetNotAllowed("log".to_string()));
  let err = merge(&s, &start(), &StateUpdate::new().reset("intent")).unwrap_err();
  assert_eq!(err, StateError::ResetNotAllowed("intent".to_string()));
}

#[test]
fn merge_leaves_current_untouched() {
  let s = schema();
  let current = start();
  let before = current.clone();
  let _ = merge(
    &s,
    &current,
    &StateUpdate::new()
      .set("intent", "billing")
      .append("log", vec![json!("a")]),
  )
  .unwrap();
  assert_eq!(current, before);
}

#[test]
fn initial_values_overlay_defaults() {
  let mut supplied = StateValues::new();
  supplied.insert("intent".to_string(), json!("technical"));
  supplied.insert("log".to_string(), json!(["seed"]));
  let values = initial_values(&schema(), &supplied).unwrap();
  assert_eq!(values.get("intent"), Some(&json!("technical")));
  assert_eq!(values.get("log"), Some(&json!(["seed"])));
  assert_eq!(values.get("confidence"), Some(&json!(0)));
}

#[test]
fn initial_values_reject_unknown_and_mismatched_fields() {
  let mut supplied = StateValues::new();
  supplied.insert("typo".to_string(), json!(1));
  assert!(matches!(
    initial_values(&schema(), &supplied),
    Err(StateError::UnknownField(_))
  ));

  let mut supplied = StateValues::new();
  supplied.insert("log".to_string(), json!("not a list"));
  assert!(matches!(
    initial_values(&schema(), &supplied),
    Err(StateError::KindMismatch { .. })
  ));
}

fn arb_update() -> impl Strategy<Value = StateUpdate> {
  prop_oneof![
    "[a-z]{1,6}".prop_map(|s| StateUpdate::new().set("intent", s)),
    (0u32..100).prop_map(|n| StateUpdate::new().set("confidence", n)),
    any::<bool>().prop_map(|b| StateUpdate::new().set("needs_more", b)),
    prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(|items| {
      StateUpdate::new().append("log", items.into_iter().map(Value::from).collect())
    }),
    prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(|items| {
      StateUpdate::new().append("feedback", items.into_iter().map(Value::from).collect())
    }),
    Just(StateUpdate::new().reset("feedback")),
  ]
}

proptest! {
  // Replaying the same update sequence from the same initial values always
  // yields the same final values.
  #[test]
  fn replay_is_deterministic(updates in prop::collection::vec(arb_update(), 0..12)) {
    let s = schema();
    let mut first = start();
    for u in &updates {
      first = merge(&s, &first, u).unwrap();
    }
    let mut second = start();
    for u in &updates {
      second = merge(&s, &second, u).unwrap();
    }
    prop_assert_eq!(first, second);
  }

  // Accumulating fields only grow unless explicitly reset.
  #[test]
  fn log_only_grows(updates in prop::collection::vec(arb_update(), 0..12)) {
    let s = schema();
    let mut values = start();
    let mut last_len = 0usize;
    for u in &updates {
      values = merge(&s, &values, u).unwrap();
      let len = values.get("log").and_then(Value::as_array).map(Vec::len).unwrap_or(0);
      prop_assert!(len >= last_len);
      last_len = len;
    }
  }
}
