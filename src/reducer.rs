//! Reducer: merge a partial update into the current state values.
//!
//! `merge` is a pure function of (schema, current, update) with no hidden
//! shared state, so replaying the same update sequence from the same
//! initial values always yields the same final values.

use serde_json::Value;
use tracing::instrument;

use crate::error::StateError;
use crate::types::{FieldPatch, MergeRule, StateSchema, StateUpdate, StateValues};

/// Merges `update` into `current` under the declared schema, returning the
/// new values. `current` is untouched.
///
/// Per-field rules: overwrite fields are replaced; accumulating fields take
/// a list fragment appended in arrival order (duplicates permitted, no
/// dedup), with an empty fragment as a no-op; an explicit reset truncates a
/// resettable accumulating field back to empty. Fields absent from the
/// update stay as they were.
#[instrument(level = "trace", skip(schema, current, update))]
pub fn merge(
  schema: &StateSchema,
  current: &StateValues,
  update: &StateUpdate,
) -> Result<StateValues, StateError> {
  let mut next = current.clone();
  for (name, patch) in &update.fields {
    let spec = schema
      .get(name)
      .ok_or_else(|| StateError::UnknownField(name.clone()))?;
    match (patch, spec.merge) {
      (FieldPatch::Set(value), MergeRule::Replace) => {
        if !spec.kind.admits(value) {
          return Err(StateError::KindMismatch {
            field: name.clone(),
            expected: spec.kind,
          });
        }
        next.insert(name.clone(), value.clone());
      }
      (FieldPatch::Set(value), MergeRule::Append { .. }) => {
        let Value::Array(fragment) = value else {
          return Err(StateError::NotAList(name.clone()));
        };
        if fragment.is_empty() {
          continue;
        }
        let entry = next
          .entry(name.clone())
          .or_insert_with(|| Value::Array(vec![]));
        let Value::Array(items) = entry else {
          return Err(StateError::NotAList(name.clone()));
        };
        items.extend(fragment.iter().cloned());
      }
      (FieldPatch::Reset, MergeRule::Append { resettable: true }) => {
        next.insert(name.clone(), Value::Array(vec![]));
      }
      (FieldPatch::Reset, _) => return Err(StateError::ResetNotAllowed(name.clone())),
    }
  }
  Ok(next)
}

/// Builds the starting values for a run: schema defaults overlaid with the
/// caller-supplied initial values, kind-checked with unknown fields
/// rejected at the boundary.
pub(crate) fn initial_values(
  schema: &StateSchema,
  supplied: &StateValues,
) -> Result<StateValues, StateError> {
  let mut values = schema.default_values();
  for (name, value) in supplied {
    let spec = schema
      .get(name)
      .ok_or_else(|| StateError::UnknownField(name.clone()))?;
    if !spec.kind.admits(value) {
      return Err(StateError::KindMismatch {
        field: name.clone(),
        expected: spec.kind,
      });
    }
    values.insert(name.clone(), value.clone());
  }
  Ok(values)
}
