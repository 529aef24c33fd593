//! Declared state schema: field name → kind + merge rule.
//!
//! The schema is fixed per graph definition and checked at compile time, so
//! a typo'd field name fails the build of the graph instead of vanishing
//! into an unused key at run time.

use std::collections::HashMap;

use super::{FieldKind, FieldSpec, MergeRule, StateValues};

/// Field names owned by the executor; rejected in schemas.
pub(crate) const RESERVED_FIELDS: [&str; 2] = ["iteration", "max_iterations"];

/// Declared fields of the shared run state.
#[derive(Debug, Clone, Default)]
pub struct StateSchema {
  fields: HashMap<String, FieldSpec>,
}

impl StateSchema {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declares an overwrite field of the given kind.
  pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
    let name = name.into();
    self.fields.insert(
      name.clone(),
      FieldSpec {
        name,
        kind,
        merge: MergeRule::Replace,
      },
    );
    self
  }

  /// Declares an append-only accumulating list field.
  pub fn accumulating(mut self, name: impl Into<String>) -> Self {
    let name = name.into();
    self.fields.insert(
      name.clone(),
      FieldSpec {
        name,
        kind: FieldKind::List,
        merge: MergeRule::Append { resettable: false },
      },
    );
    self
  }

  /// Declares an accumulating list field that also accepts explicit reset
  /// updates (used by reflection-style cycles that restart sub-collection).
  pub fn accumulating_resettable(mut self, name: impl Into<String>) -> Self {
    let name = name.into();
    self.fields.insert(
      name.clone(),
      FieldSpec {
        name,
        kind: FieldKind::List,
        merge: MergeRule::Append { resettable: true },
      },
    );
    self
  }

  pub fn get(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.fields.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.fields.keys().map(String::as_str)
  }

  /// Starting values: one default per declared field.
  pub fn default_values(&self) -> StateValues {
    self
      .fields
      .values()
      .map(|spec| (spec.name.clone(), spec.kind.default_value()))
      .collect()
  }
}
