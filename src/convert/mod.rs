//! Shader conversion engine - mapping tables, rewrite planning, and the
//! atomic command that applies a conversion with full undo/redo

pub mod batch;
pub mod command;
pub mod mapping;
pub mod planner;

#[cfg(test)]
mod convert_tests;

// Re-export the conversion surface
pub use batch::{convert_all, convert_nodes, BatchReport, PROTECTED_DEFAULTS};
pub use command::{convert, CommandState, ConvertReport, RewriteCommand};
pub use mapping::{AttributeMap, DEFAULT_MAP};
pub use planner::{plan, RewritePlan};
