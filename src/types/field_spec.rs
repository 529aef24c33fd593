//! One declared field of the shared run state: kind plus merge rule.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a declared state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
  String,
  Number,
  Bool,
  List,
  Record,
}

impl FieldKind {
  /// Returns true if `value` is an instance of this kind.
  pub fn admits(&self, value: &Value) -> bool {
    match self {
      FieldKind::String => value.is_string(),
      FieldKind::Number => value.is_number(),
      FieldKind::Bool => value.is_boolean(),
      FieldKind::List => value.is_array(),
      FieldKind::Record => value.is_object(),
    }
  }

  /// Starting value for fields absent from the caller-supplied initial state.
  pub fn default_value(&self) -> Value {
    match self {
      FieldKind::String => Value::String(String::new()),
      FieldKind::Number => Value::from(0),
      FieldKind::Bool => Value::Bool(false),
      FieldKind::List => Value::Array(vec![]),
      FieldKind::Record => Value::Object(serde_json::Map::new()),
    }
  }
}

impl fmt::Display for FieldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FieldKind::String => write!(f, "string"),
      FieldKind::Number => write!(f, "number"),
      FieldKind::Bool => write!(f, "bool"),
      FieldKind::List => write!(f, "list"),
      FieldKind::Record => write!(f, "record"),
    }
  }
}

/// Merge rule applied when an update touches the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeRule {
  /// The update value replaces the prior value.
  Replace,
  /// The update is a list fragment appended to the prior list. Fields with
  /// `resettable: true` additionally accept an explicit reset update that
  /// truncates the list back to empty.
  Append { resettable: bool },
}

/// One declared field of the run state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
  pub name: String,
  pub kind: FieldKind,
  pub merge: MergeRule,
}

impl FieldSpec {
  pub fn is_accumulating(&self) -> bool {
    matches!(self.merge, MergeRule::Append { .. })
  }

  pub fn is_resettable(&self) -> bool {
    matches!(self.merge, MergeRule::Append { resettable: true })
  }
}
