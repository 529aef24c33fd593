//! Node handler implementations.

mod capability_node;
mod fn_node;
#[cfg(test)]
mod fn_node_test;

pub use capability_node::CapabilityNode;
pub use fn_node::FnNode;
