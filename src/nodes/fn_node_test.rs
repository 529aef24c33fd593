//! Tests for `FnNode`.

use serde_json::json;

use crate::handler::{NodeError, NodeHandler};
use crate::nodes::FnNode;
use crate::types::{RunState, StateUpdate, StateValues};

fn state() -> RunState {
  let mut values = StateValues::new();
  values.insert("counter".to_string(), json!(2));
  RunState::new(values, 5)
}

#[test]
fn closure_sees_state_and_returns_update() {
  let node = FnNode::new(|state: &RunState| {
    let counter = state.get("counter").and_then(|v| v.as_i64()).unwrap_or(0);
    Ok(StateUpdate::new().set("counter", counter + 1))
  });
  let update = tokio_test::block_on(node.run(&state())).unwrap();
  assert_eq!(
    update,
    StateUpdate::new().set("counter", 3),
  );
}

#[test]
fn closure_errors_pass_through() {
  let node = FnNode::new(|_: &RunState| Err(NodeError::Failed("no input".to_string())));
  let err = tokio_test::block_on(node.run(&state())).unwrap_err();
  assert!(err.to_string().contains("no input"));
}
