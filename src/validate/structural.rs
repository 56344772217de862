//! Graph-integrity rules run on an already-built index.

use std::collections::HashSet;

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;

use crate::error::GraphError;
use crate::graph::index::GraphIndex;
use crate::graph::types::{FlowEdge, FlowNode};

/// Run all structural rules. Returns every violation found.
pub fn validate_structure(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    index: &GraphIndex,
) -> Vec<GraphError> {
    let mut errors = Vec::new();

    no_self_loops(edges, &mut errors);
    no_duplicate_edges(edges, &mut errors);
    no_reachable_cycles(nodes, index, &mut errors);

    errors
}

fn no_self_loops(edges: &[FlowEdge], errors: &mut Vec<GraphError>) {
    for edge in edges {
        if edge.source == edge.target {
            errors.push(GraphError::SelfLoop {
                node_id: edge.source.clone(),
            });
        }
    }
}

fn no_duplicate_edges(edges: &[FlowEdge], errors: &mut Vec<GraphError>) {
    let mut seen = HashSet::new();
    for edge in edges {
        let key = (
            edge.source.clone(),
            edge.target.clone(),
            edge.source_handle.clone(),
            edge.target_handle.clone(),
        );
        if !seen.insert(key) {
            errors.push(GraphError::DuplicateEdge {
                source_id: edge.source.clone(),
                target_id: edge.target.clone(),
            });
        }
    }
}

/// Reject cycles the execution walk could actually reach. A cycle among
/// nodes no trigger reaches never enters the ordering traversal (those
/// nodes are appended, not walked), so it stays a visual-only artifact and
/// must not block serialization.
fn no_reachable_cycles(nodes: &[FlowNode], index: &GraphIndex, errors: &mut Vec<GraphError>) {
    let reachable = trigger_reachable(nodes, index);

    for scc in tarjan_scc(&index.graph) {
        // Self-loops are reported by their own rule.
        if scc.len() < 2 || !scc.iter().any(|idx| reachable.contains(idx)) {
            continue;
        }
        let mut members: Vec<&str> = scc.iter().map(|&idx| index.graph[idx].as_str()).collect();
        members.sort_unstable();
        errors.push(GraphError::CycleDetected {
            node_id: members[0].to_string(),
        });
    }
}

/// Every node index reachable from any trigger node, triggers included.
fn trigger_reachable(nodes: &[FlowNode], index: &GraphIndex) -> HashSet<NodeIndex> {
    let mut reachable = HashSet::new();
    for node in nodes.iter().filter(|n| n.is_trigger()) {
        let Some(&start) = index.node_indices.get(node.id()) else {
            continue;
        };
        let mut dfs = Dfs::new(&index.graph, start);
        while let Some(idx) = dfs.next(&index.graph) {
            reachable.insert(idx);
        }
    }
    reachable
}
