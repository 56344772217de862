//! Pre-save validation of the visual graph.
//!
//! Two layers: `validate_workflow` produces the user-facing completeness
//! report the builder shows next to the save button, and `validate_graph`
//! runs the typed structural pass shared with the serializer gate.

pub mod structural;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::graph::types::{FlowEdge, FlowNode};
use crate::graph::GraphIndex;

/// Cumulative completeness report. `valid` holds exactly when `errors` is
/// empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check structural completeness: at least one trigger, at least one step,
/// no unlabeled nodes. Non-short-circuiting; pure.
pub fn validate_workflow(nodes: &[FlowNode]) -> ValidationReport {
    let mut errors = Vec::new();

    let trigger_count = nodes.iter().filter(|n| n.is_trigger()).count();
    if trigger_count == 0 {
        errors.push("Workflow must have at least one trigger node".to_string());
    }

    let step_count = nodes.iter().filter(|n| !n.is_trigger()).count();
    if step_count == 0 {
        errors.push("Workflow must have at least one step node".to_string());
    }

    for node in nodes {
        if node.label().trim().is_empty() {
            errors.push(format!("Node '{}' has an empty label", node.id()));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Run the typed structural pass over a raw node/edge list. Dangling edges
/// surface from index construction; the remaining rules run on the node
/// list and index.
pub fn validate_graph(nodes: &[FlowNode], edges: &[FlowEdge]) -> Vec<GraphError> {
    let index = match GraphIndex::build(nodes, edges) {
        Ok(index) => index,
        Err(errors) => return errors,
    };
    structural::validate_structure(nodes, edges, &index)
}
