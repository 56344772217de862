//! Visual graph model: JSON → Rust types + petgraph index.

pub mod index;
pub mod types;

pub use index::GraphIndex;
pub use types::*;

use crate::error::GraphError;

/// Deserialize a canvas graph JSON string into a `FlowGraph`.
pub fn parse(json: &str) -> Result<FlowGraph, Vec<GraphError>> {
    serde_json::from_str::<FlowGraph>(json)
        .map_err(|e| vec![GraphError::Parse(e.to_string())])
}

/// Parse JSON and build the index in one step.
pub fn parse_and_index(json: &str) -> Result<(FlowGraph, GraphIndex), Vec<GraphError>> {
    let flow = parse(json)?;
    let index = GraphIndex::build(&flow.nodes, &flow.edges)?;
    Ok((flow, index))
}
