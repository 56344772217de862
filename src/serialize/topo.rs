//! Execution ordering of step nodes.
//!
//! Steps are ordered by reverse post-order of a depth-first walk rooted at
//! each trigger's outgoing edges, which linearizes a DAG along its execution
//! paths. Adjacency comes from the graph index in edge insertion order, so
//! sibling order under fan-out is an implementation-defined tie-break, not a
//! contract. The structural pass rejects trigger-reachable cycles before
//! this runs; the walk is iterative and keeps a visited set regardless, so
//! cycles among unreached nodes cannot loop it.

use std::collections::{HashMap, HashSet};

use crate::graph::types::FlowNode;
use crate::graph::GraphIndex;

enum Frame<'a> {
    Enter(&'a str),
    Exit(&'a str),
}

/// Order step node ids for execution. Step nodes unreached from any trigger
/// are appended at the end in original array order.
pub fn order_steps<'a>(nodes: &'a [FlowNode], index: &'a GraphIndex) -> Vec<String> {
    let is_step: HashMap<&str, bool> = nodes
        .iter()
        .map(|n| (n.id(), !n.is_trigger()))
        .collect();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut postorder: Vec<&str> = Vec::new();

    for trigger in nodes.iter().filter(|n| n.is_trigger()) {
        for (target, _) in index.successors(trigger.id()) {
            walk(target, &is_step, index, &mut visited, &mut postorder);
        }
    }

    let mut ordered: Vec<String> = postorder.iter().rev().map(|s| s.to_string()).collect();

    // Disconnected steps still execute; they go last, in canvas order.
    for node in nodes {
        if !node.is_trigger() && !visited.contains(node.id()) {
            ordered.push(node.id().to_string());
        }
    }

    ordered
}

fn walk<'a>(
    root: &'a str,
    is_step: &HashMap<&'a str, bool>,
    index: &'a GraphIndex,
    visited: &mut HashSet<&'a str>,
    postorder: &mut Vec<&'a str>,
) {
    if !is_step.get(root).copied().unwrap_or(false) {
        return;
    }

    let mut stack = vec![Frame::Enter(root)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                if !visited.insert(id) {
                    continue;
                }
                stack.push(Frame::Exit(id));
                // Reversed push so the first edge in insertion order is
                // walked first.
                for (target, _) in index.successors(id).into_iter().rev() {
                    if is_step.get(target).copied().unwrap_or(false)
                        && !visited.contains(target)
                    {
                        stack.push(Frame::Enter(target));
                    }
                }
            }
            Frame::Exit(id) => postorder.push(id),
        }
    }
}
