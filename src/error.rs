//! Error types for graph access, planning, and command application.

use thiserror::Error;

/// Errors raised while querying or mutating the node graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node name could not be resolved in the graph.
    #[error("({0}): node does not exist")]
    NodeNotFound(String),

    /// A dotted attribute path failed to resolve at some segment.
    #[error("({node}.{path}): attribute does not exist")]
    AttributeNotFound { node: String, path: String },

    /// A destination plug already has an incoming connection.
    #[error("({dest}): plug already has an incoming connection")]
    DestinationOccupied { dest: String },

    /// A disconnect named an edge that is not present.
    #[error("({src} -> {dest}): connection does not exist")]
    ConnectionNotFound { src: String, dest: String },

    /// A node cannot be connected to itself.
    #[error("({0}): cannot connect a node to itself")]
    SelfConnection(String),

    /// A value write did not match the plug's kind.
    #[error("({plug}): expected {expected} value, got {found}")]
    ValueKindMismatch {
        plug: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while computing a rewrite plan. Planning never mutates
/// the graph, so these always surface before any change is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    /// Source or destination could not be resolved.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The source node's type has no conversion map.
    #[error("({node}): no conversion map for node type '{node_type}'")]
    UnsupportedType { node: String, node_type: String },

    /// Nothing on the source could be converted at all.
    #[error("({src} -> {dest}): nothing to convert")]
    EmptyPlan { src: String, dest: String },
}

/// Errors raised while applying, undoing, or redoing a rewrite command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplyError {
    /// A mutation failed mid-apply. Everything applied before it has been
    /// rolled back when this surfaces.
    #[error("{action} failed, rolled back: {cause}")]
    Mutation { action: String, cause: GraphError },

    /// The command was driven through an illegal state transition,
    /// e.g. `undo` before `execute`.
    #[error("command is {actual}, expected {expected}")]
    CommandState {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Top-level failure of a conversion request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("planning failed: {0}")]
    Planning(#[from] PlanningError),

    #[error("apply failed: {0}")]
    Apply(#[from] ApplyError),
}
