//! Declarative graph definition: schema, nodes, edges, entry.
//!
//! A [GraphBuilder] collects the definition; [GraphBuilder::compile]
//! validates it and freezes it into a
//! [CompiledGraph](crate::compiler::CompiledGraph) that many runs may share
//! read-only.

use std::sync::Arc;

use crate::compiler::{self, CompiledGraph};
use crate::error::CompileError;
use crate::handler::NodeSpec;
use crate::routing::Router;
use crate::types::{RunState, StateSchema};

/// Sentinel edge target that ends the run.
pub const END: &str = "__end__";

/// One declared outgoing edge.
pub(crate) enum EdgeDecl {
  Static {
    to: String,
  },
  Conditional {
    router: Router,
    targets: Vec<(String, String)>,
  },
}

/// Cycle rule for a conditional edge: which label closes the cycle (bumping
/// the iteration counter) and which label the executor forces once the
/// ceiling is reached.
#[derive(Debug, Clone)]
pub(crate) struct CycleRule {
  pub closing_label: String,
  pub exit_label: String,
}

/// Builder for a graph definition.
pub struct GraphBuilder {
  pub(crate) schema: StateSchema,
  pub(crate) nodes: Vec<(String, NodeSpec)>,
  pub(crate) edges: Vec<(String, EdgeDecl)>,
  pub(crate) cycles: Vec<(String, CycleRule)>,
  pub(crate) entry: Option<String>,
}

impl GraphBuilder {
  pub fn new(schema: StateSchema) -> Self {
    Self {
      schema,
      nodes: vec![],
      edges: vec![],
      cycles: vec![],
      entry: None,
    }
  }

  pub fn add_node(mut self, name: impl Into<String>, spec: NodeSpec) -> Self {
    self.nodes.push((name.into(), spec));
    self
  }

  /// Declares an unconditional edge. `to` may be [END].
  pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
    self.edges.push((from.into(), EdgeDecl::Static { to: to.into() }));
    self
  }

  /// Declares a conditional edge: `router` picks one of the declared labels
  /// from the current state; each label maps to a node name or [END].
  /// Routers must be side-effect-free and total over the label set — an
  /// undeclared label fails the run.
  pub fn add_conditional_edges<R, I, L, T>(
    mut self,
    from: impl Into<String>,
    router: R,
    targets: I,
  ) -> Self
  where
    R: Fn(&RunState) -> String + Send + Sync + 'static,
    I: IntoIterator<Item = (L, T)>,
    L: Into<String>,
    T: Into<String>,
  {
    self.edges.push((
      from.into(),
      EdgeDecl::Conditional {
        router: Arc::new(router),
        targets: targets
          .into_iter()
          .map(|(label, to)| (label.into(), to.into()))
          .collect(),
      },
    ));
    self
  }

  /// Declares the cycle on `from`'s conditional edge: traversing
  /// `closing_label` counts one iteration, and once the run's ceiling is
  /// reached the executor forces `exit_label` regardless of what the
  /// routing function alone would choose.
  pub fn mark_cycle(
    mut self,
    from: impl Into<String>,
    closing_label: impl Into<String>,
    exit_label: impl Into<String>,
  ) -> Self {
    self.cycles.push((
      from.into(),
      CycleRule {
        closing_label: closing_label.into(),
        exit_label: exit_label.into(),
      },
    ));
    self
  }

  /// Declares the default entry node (a run may override it).
  pub fn entry(mut self, node: impl Into<String>) -> Self {
    self.entry = Some(node.into());
    self
  }

  /// Validates the definition and freezes it for execution.
  pub fn compile(self) -> Result<CompiledGraph, CompileError> {
    compiler::compile(self)
  }
}
