//! Serialization phase: visual graph → backend workflow document.
//!
//! Orchestrates the structural gate, trigger/step partitioning, execution
//! ordering, and document assembly. The emitted document always satisfies
//! the backend's "at least one trigger, at least one step" rule: an
//! edited-down graph gets a synthesized manual trigger and custom step.
//! `validate::validate_workflow` remains the user-facing gate; the synthesis
//! here is backend-contract parity, not a substitute for it.

pub mod step;
pub mod topo;
pub mod trigger;

use std::collections::{HashMap, HashSet};

use crate::backend::types::{
    DocumentConfiguration, LayoutCache, WorkflowDocument, WorkflowMeta,
};
use crate::error::GraphError;
use crate::graph::types::{FlowEdge, FlowGraph, FlowNode};
use crate::graph::GraphIndex;
use crate::validate::structural;

/// Serialize a whole builder graph, taking metadata from the graph itself.
pub fn to_backend(flow: &FlowGraph) -> Result<WorkflowDocument, Vec<GraphError>> {
    let meta = WorkflowMeta {
        name: flow.name.clone(),
        description: flow.description.clone(),
        workflow_type: flow.workflow_type.clone(),
    };
    to_backend_parts(&flow.nodes, &flow.edges, &meta)
}

/// Serialize a node/edge array pair into the backend document.
///
/// Fails with typed errors when the graph is structurally unsound (dangling
/// edges, self-loops, duplicate edges, trigger-reachable cycles); never
/// traverses an unsound graph.
pub fn to_backend_parts(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    meta: &WorkflowMeta,
) -> Result<WorkflowDocument, Vec<GraphError>> {
    let index = GraphIndex::build(nodes, edges)?;
    let errors = structural::validate_structure(nodes, edges, &index);
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut triggers: Vec<_> = nodes
        .iter()
        .filter_map(|n| match n {
            FlowNode::EventSource(base) => Some(trigger::lower_trigger(base)),
            _ => None,
        })
        .collect();

    let node_map: HashMap<&str, &FlowNode> = nodes.iter().map(|n| (n.id(), n)).collect();
    let ordered = topo::order_steps(nodes, &index);
    let ordered_set: HashSet<&str> = ordered.iter().map(|s| s.as_str()).collect();

    let mut steps = Vec::with_capacity(ordered.len());
    for (i, id) in ordered.iter().enumerate() {
        let Some(&node) = node_map.get(id.as_str()) else {
            continue;
        };
        let has_next = has_continuing_edge(id, &index, &ordered_set);
        if let Some(s) = step::lower_step(node, (i + 1) as u32, has_next) {
            steps.push(s);
        }
    }

    if triggers.is_empty() {
        triggers.push(trigger::default_manual_trigger());
    }
    if steps.is_empty() {
        steps.push(step::default_custom_step());
    }

    Ok(WorkflowDocument {
        name: meta.name.clone(),
        description: meta.description.clone(),
        workflow_type: meta.workflow_type.clone(),
        configuration: DocumentConfiguration {
            reactflow: Some(LayoutCache {
                nodes: nodes.to_vec(),
                edges: edges.to_vec(),
            }),
        },
        steps,
        triggers,
    })
}

/// A step continues to a successor when an outgoing edge on the default,
/// "output", or "true" handle targets another ordered step.
fn has_continuing_edge(node_id: &str, index: &GraphIndex, ordered: &HashSet<&str>) -> bool {
    index.successors(node_id).into_iter().any(|(target, label)| {
        matches!(label.source_handle.as_deref(), None | Some("output") | Some("true"))
            && ordered.contains(target)
    })
}
