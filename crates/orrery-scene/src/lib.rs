//! Hierarchical transform nodes stored in an arena.
//!
//! Nodes own their local rotation and translation. World matrices are
//! composed on demand by walking parent links through the [`SceneGraph`].

mod graph;
mod node;

pub use graph::{NodeId, SceneGraph};
pub use node::TransformNode;
