//! Node graph system - core data structures for typed nodes, plugs, and
//! connections

pub mod graph;
pub mod node;
pub mod plug;
pub mod value;

// Re-export core types
pub use graph::{Connection, NodeGraph, PlugAddr};
pub use node::{Node, NodeId};
pub use plug::{Plug, PlugIndex, PlugKind};
pub use value::PlugValue;
