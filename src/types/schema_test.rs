//! Tests for `StateSchema`.

use serde_json::json;

use super::{FieldKind, MergeRule, StateSchema};

fn schema() -> StateSchema {
  StateSchema::new()
    .field("intent", FieldKind::String)
    .field("confidence", FieldKind::Number)
    .accumulating("log")
    .accumulating_resettable("feedback")
}

#[test]
fn declared_fields_are_queryable() {
  let s = schema();
  assert_eq!(s.len(), 4);
  assert!(s.contains("intent"));
  assert!(!s.contains("missing"));
  assert_eq!(s.get("intent").map(|f| f.kind), Some(FieldKind::String));
  assert_eq!(
    s.get("log").map(|f| f.merge),
    Some(MergeRule::Append { resettable: false })
  );
  assert_eq!(
    s.get("feedback").map(|f| f.merge),
    Some(MergeRule::Append { resettable: true })
  );
}

#[test]
fn accumulating_fields_are_lists() {
  let s = schema();
  assert_eq!(s.get("log").map(|f| f.kind), Some(FieldKind::List));
  assert_eq!(s.get("feedback").map(|f| f.kind), Some(FieldKind::List));
}

#[test]
fn default_values_cover_every_field() {
  let values = schema().default_values();
  assert_eq!(values.len(), 4);
  assert_eq!(values.get("intent"), Some(&json!("")));
  assert_eq!(values.get("confidence"), Some(&json!(0)));
  assert_eq!(values.get("log"), Some(&json!([])));
  assert_eq!(values.get("feedback"), Some(&json!([])));
}

#[test]
fn redeclaring_a_field_replaces_it() {
  let s = StateSchema::new()
    .field("x", FieldKind::String)
    .field("x", FieldKind::Number);
  assert_eq!(s.len(), 1);
  assert_eq!(s.get("x").map(|f| f.kind), Some(FieldKind::Number));
}
