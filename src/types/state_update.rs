//! Partial state update returned by a node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Patch for one field of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPatch {
  /// Replace the field (overwrite fields) or append a list fragment
  /// (accumulating fields).
  Set(Value),
  /// Truncate a resettable accumulating field back to empty.
  Reset,
}

/// Partial update: only the fields a node changes. Fields absent from the
/// update are left untouched by the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
  pub fields: BTreeMap<String, FieldPatch>,
}

impl StateUpdate {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets a field: replacement value, or list fragment for accumulating
  /// fields.
  pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
    self.fields.insert(field.into(), FieldPatch::Set(value.into()));
    self
  }

  /// Sets an accumulating field to the given fragment.
  pub fn append(mut self, field: impl Into<String>, items: Vec<Value>) -> Self {
    self
      .fields
      .insert(field.into(), FieldPatch::Set(Value::Array(items)));
    self
  }

  /// Requests an explicit reset of a resettable accumulating field.
  pub fn reset(mut self, field: impl Into<String>) -> Self {
    self.fields.insert(field.into(), FieldPatch::Reset);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// Builds an update from a JSON object: one `Set` patch per key.
  pub fn from_object(object: serde_json::Map<String, Value>) -> Self {
    Self {
      fields: object
        .into_iter()
        .map(|(name, value)| (name, FieldPatch::Set(value)))
        .collect(),
    }
  }
}
