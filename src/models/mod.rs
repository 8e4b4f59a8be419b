//! Models module for the tree editor
//!
//! This module contains the node records, the bootstrap data format injected
//! by the server, the collapsed-node set and the tree model itself.

pub mod bootstrap;
pub mod collapsed;
pub mod node;
pub mod tree;

// Re-export commonly used types
pub use bootstrap::{Adjacency, TreeBootstrap};
pub use collapsed::CollapsedSet;
pub use node::{Node, NodeId};
pub use tree::TreeModel;
