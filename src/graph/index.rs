//! petgraph-based directed index over the visual workflow graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{FlowEdge, FlowNode};
use crate::error::{EdgeEnd, GraphError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

#[derive(Debug)]
pub struct GraphIndex {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl GraphIndex {
    /// Index nodes and edges. Dangling edges and duplicate node ids are
    /// collected rather than short-circuited so the UI can show all of them.
    pub fn build(nodes: &[FlowNode], edges: &[FlowEdge]) -> Result<Self, Vec<GraphError>> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut errors = Vec::new();

        for node in nodes {
            let id = node.id().to_string();
            if node_indices.contains_key(&id) {
                errors.push(GraphError::DuplicateNodeId { node_id: id });
                continue;
            }
            let idx = graph.add_node(id.clone());
            node_indices.insert(id, idx);
        }

        for edge in edges {
            let source_idx = node_indices.get(&edge.source);
            let target_idx = node_indices.get(&edge.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        EdgeLabel {
                            source_handle: edge.source_handle.clone(),
                            target_handle: edge.target_handle.clone(),
                        },
                    );
                }
                (None, _) => {
                    errors.push(GraphError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        end: EdgeEnd::Source,
                        node_id: edge.source.clone(),
                    });
                }
                (_, None) => {
                    errors.push(GraphError::DanglingEdge {
                        edge_id: edge.id.clone(),
                        end: EdgeEnd::Target,
                        node_id: edge.target.clone(),
                    });
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(GraphIndex { graph, node_indices })
    }

    /// Outgoing edges of a node as `(target id, label)` pairs, one entry per
    /// edge, in edge insertion order. Parallel edges between the same pair
    /// stay distinct, each with its own label.
    pub fn successors(&self, node_id: &str) -> Vec<(&str, &EdgeLabel)> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        let mut out: Vec<(&str, &EdgeLabel)> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Outgoing)
            .map(|e| (self.graph[e.target()].as_str(), e.weight()))
            .collect();
        // edges_directed iterates newest-first.
        out.reverse();
        out
    }
}
