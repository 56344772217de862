//! Typed errors shared by graph construction, validation, and serialization.

use thiserror::Error;

/// Which end of an edge a dangling reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Source,
    Target,
}

impl std::fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeEnd::Source => write!(f, "source"),
            EdgeEnd::Target => write!(f, "target"),
        }
    }
}

/// Structural problems in a visual workflow graph.
///
/// These gate serialization: a graph that fails the structural pass is never
/// traversed, so the ordering code can assume a DAG with resolvable edges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("failed to parse workflow JSON: {0}")]
    Parse(String),

    #[error("edge '{edge_id}' references unknown {end} node '{node_id}'")]
    DanglingEdge {
        edge_id: String,
        end: EdgeEnd,
        node_id: String,
    },

    #[error("cycle detected at node '{node_id}'")]
    CycleDetected { node_id: String },

    #[error("self-loop on node '{node_id}'")]
    SelfLoop { node_id: String },

    // Field names avoid `source`, which thiserror reserves for error
    // chaining.
    #[error("duplicate edge from '{source_id}' to '{target_id}'")]
    DuplicateEdge { source_id: String, target_id: String },

    #[error("duplicate node id '{node_id}'")]
    DuplicateNodeId { node_id: String },
}

impl GraphError {
    /// The node the error points at, when it points at one.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            GraphError::Parse(_) => None,
            GraphError::DanglingEdge { node_id, .. } => Some(node_id),
            GraphError::CycleDetected { node_id } => Some(node_id),
            GraphError::SelfLoop { node_id } => Some(node_id),
            GraphError::DuplicateEdge { .. } => None,
            GraphError::DuplicateNodeId { node_id } => Some(node_id),
        }
    }
}
