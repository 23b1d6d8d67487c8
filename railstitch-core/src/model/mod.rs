//! Graph model for rail path reconstruction
//!
//! Contains the node and way records and the graph that owns them.

pub mod components;
pub mod graph;

#[cfg(test)]
pub(crate) mod fixtures;

pub use components::{Node, Way};
pub use graph::GraphModel;
