//! Validate a graph definition and freeze it for execution.
//!
//! Every structural contract is checked here so runs cannot trip over a
//! malformed definition later: the entry exists, every edge target is a
//! declared node or [END](crate::graph::END), conditional labels map to
//! declared nodes, cycle rules name declared labels, and node field
//! declarations match the schema.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, instrument};

use crate::error::CompileError;
use crate::graph::{EdgeDecl, END, GraphBuilder};
use crate::handler::NodeSpec;
use crate::routing::{Edge, Target};
use crate::types::{RESERVED_FIELDS, StateSchema};

/// Immutable, validated graph. Read-only after compilation; safe to share
/// across concurrent runs behind an `Arc`.
#[derive(Debug)]
pub struct CompiledGraph {
  schema: StateSchema,
  nodes: HashMap<String, NodeSpec>,
  edges: HashMap<String, Edge>,
  entry: String,
}

impl CompiledGraph {
  /// Declared default entry node.
  pub fn entry(&self) -> &str {
    &self.entry
  }

  pub fn schema(&self) -> &StateSchema {
    &self.schema
  }

  pub fn contains_node(&self, name: &str) -> bool {
    self.nodes.contains_key(name)
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub(crate) fn node(&self, name: &str) -> &NodeSpec {
    &self.nodes[name]
  }

  pub(crate) fn edge(&self, name: &str) -> &Edge {
    &self.edges[name]
  }
}

fn check_target(from: &str, to: &str, nodes: &HashMap<String, NodeSpec>) -> Result<(), CompileError> {
  if to != END && !nodes.contains_key(to) {
    return Err(CompileError::DanglingTarget {
      from: from.to_string(),
      to: to.to_string(),
    });
  }
  Ok(())
}

/// Compiles a [GraphBuilder] into a [CompiledGraph].
#[instrument(level = "trace", skip(builder))]
pub(crate) fn compile(builder: GraphBuilder) -> Result<CompiledGraph, CompileError> {
  for reserved in RESERVED_FIELDS {
    if builder.schema.contains(reserved) {
      return Err(CompileError::ReservedField(reserved.to_string()));
    }
  }

  let mut nodes: HashMap<String, NodeSpec> = HashMap::new();
  for (name, spec) in builder.nodes {
    if nodes.insert(name.clone(), spec).is_some() {
      return Err(CompileError::DuplicateNode(name));
    }
  }

  let entry = builder.entry.ok_or(CompileError::MissingEntry)?;
  if !nodes.contains_key(&entry) {
    return Err(CompileError::UnknownEntry(entry));
  }

  for (name, spec) in &nodes {
    for field in spec.reads.iter().chain(spec.writes.iter().flatten()) {
      if !builder.schema.contains(field) {
        return Err(CompileError::UndeclaredField {
          node: name.clone(),
          field: field.clone(),
        });
      }
    }
  }

  let mut edges: HashMap<String, Edge> = HashMap::new();
  for (from, decl) in builder.edges {
    if !nodes.contains_key(&from) {
      return Err(CompileError::UnknownEdgeSource(from));
    }
    if edges.contains_key(&from) {
      return Err(CompileError::ConflictingEdges(from));
    }
    let edge = match decl {
      EdgeDecl::Static { to } => {
        check_target(&from, &to, &nodes)?;
        Edge::Static {
          target: Target::parse(&to),
        }
      }
      EdgeDecl::Conditional { router, targets } => {
        let mut map = BTreeMap::new();
        for (label, to) in targets {
          if to != END && !nodes.contains_key(&to) {
            return Err(CompileError::DanglingLabel {
              node: from.clone(),
              label,
              to,
            });
          }
          if map.insert(label.clone(), Target::parse(&to)).is_some() {
            return Err(CompileError::DuplicateLabel {
              node: from.clone(),
              label,
            });
          }
        }
        Edge::Conditional {
          router,
          targets: map,
          cycle: None,
        }
      }
    };
    edges.insert(from, edge);
  }

  for name in nodes.keys() {
    if !edges.contains_key(name) {
      return Err(CompileError::MissingEdge(name.clone()));
    }
  }

  for (from, rule) in builder.cycles {
    let Some(Edge::Conditional { targets, cycle, .. }) = edges.get_mut(&from) else {
      return Err(CompileError::CycleWithoutConditional(from));
    };
    for label in [&rule.closing_label, &rule.exit_label] {
      if !targets.contains_key(label) {
        return Err(CompileError::UnknownCycleLabel {
          node: from.clone(),
          label: label.clone(),
        });
      }
    }
    *cycle = Some(rule);
  }

  info!(
    node_count = nodes.len(),
    field_count = builder.schema.len(),
    entry = %entry,
    "graph compiled"
  );
  Ok(CompiledGraph {
    schema: builder.schema,
    nodes,
    edges,
    entry,
  })
}
