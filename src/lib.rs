//! Shaderwire - shader network conversion engine
//!
//! Batch-converts legacy shader nodes (lambert, blinn, phong, mental ray
//! materials) to a physically-based standard surface on an in-memory node
//! graph: incoming and outgoing connections are rewired to the mapped
//! attributes of the new shader, unconnected attribute values are copied
//! across, and every conversion applies as one atomic, undoable command.

pub mod convert;
pub mod error;
pub mod nodes;
pub mod shaders;

// Re-export the primary surface
pub use convert::{
    convert, convert_all, AttributeMap, ConvertReport, RewriteCommand, RewritePlan, DEFAULT_MAP,
};
pub use error::{ApplyError, ConvertError, GraphError, PlanningError};
pub use nodes::{Connection, Node, NodeGraph, NodeId, PlugAddr, PlugKind, PlugValue};
