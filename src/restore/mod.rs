//! Restore phase: backend document or creation template → editable graph.
//!
//! Two paths with very different fidelity. A document saved through the
//! builder carries a verbatim `reactflow` layout cache and restores
//! losslessly. Without the cache, the graph is rebuilt heuristically from
//! the step list: visual kinds are inferred from configuration shape and
//! edges are synthesized as a straight chain, which cannot represent
//! branching or fan-in. `Provenance` tells callers which path produced the
//! result. Restore never fails; absent data yields an empty manual-trigger
//! canvas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::types::{
    Step, StepConditions, TemplateStep, Trigger, WorkflowDocument, WorkflowTemplate,
};
use crate::graph::types::*;
use crate::id::IdGen;

const TRIGGER_COLUMN_X: f64 = 80.0;
const TRIGGER_BASE_Y: f64 = 80.0;
const TRIGGER_SPACING_Y: f64 = 140.0;
const STEP_BASE_X: f64 = 360.0;
const STEP_SPACING_X: f64 = 240.0;
const STEP_ROW_Y: f64 = 80.0;

/// Where a restored graph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    /// Verbatim layout cache; faithful to what the user last saw.
    LayoutCache,
    /// Heuristic reconstruction from the step list; lossy.
    Heuristic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoredGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub provenance: Provenance,
}

/// Rebuild the editable graph from a saved workflow document.
pub fn from_document(doc: &WorkflowDocument, ids: &mut dyn IdGen) -> RestoredGraph {
    if let Some(cache) = &doc.configuration.reactflow {
        return RestoredGraph {
            nodes: cache.nodes.clone(),
            edges: cache.edges.clone(),
            provenance: Provenance::LayoutCache,
        };
    }

    let mut steps: Vec<&Step> = doc.steps.iter().collect();
    steps.sort_by_key(|s| s.order);
    let sources: Vec<StepSource> = steps.into_iter().map(StepSource::from_step).collect();

    reconstruct(&doc.triggers, &sources, ids)
}

/// Rebuild the editable graph from a creation-time template.
pub fn from_template(template: &WorkflowTemplate, ids: &mut dyn IdGen) -> RestoredGraph {
    let mut triggers = template.triggers.clone();
    if triggers.is_empty() {
        if let Some(trigger_type) = &template.trigger_type {
            triggers.push(Trigger {
                trigger_type: trigger_type.clone(),
                name: format!("{} Trigger", capitalize(trigger_type)),
                configuration: Default::default(),
            });
        }
    }

    let mut steps: Vec<&TemplateStep> = template.steps.iter().collect();
    steps.sort_by_key(|s| s.order.unwrap_or(u32::MAX));
    let sources: Vec<StepSource> = steps.into_iter().map(StepSource::from_template).collect();

    reconstruct(&triggers, &sources, ids)
}

// =============================================================================
// RECONSTRUCTION
// =============================================================================

/// Common projection of saved and template steps.
struct StepSource<'a> {
    name: &'a str,
    configuration: &'a ConfigMap,
    conditions: Option<&'a StepConditions>,
    timeout: Option<u64>,
    retry_count: Option<u32>,
}

impl<'a> StepSource<'a> {
    fn from_step(step: &'a Step) -> Self {
        StepSource {
            name: &step.name,
            configuration: &step.configuration,
            conditions: step.conditions.as_ref(),
            timeout: Some(step.timeout),
            retry_count: Some(step.retry_count),
        }
    }

    fn from_template(step: &'a TemplateStep) -> Self {
        StepSource {
            name: &step.name,
            configuration: &step.configuration,
            conditions: None,
            timeout: None,
            retry_count: None,
        }
    }
}

fn reconstruct(
    triggers: &[Trigger],
    steps: &[StepSource<'_>],
    ids: &mut dyn IdGen,
) -> RestoredGraph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    if triggers.is_empty() && steps.is_empty() {
        nodes.push(manual_trigger_node(ids, 0));
        return RestoredGraph {
            nodes,
            edges,
            provenance: Provenance::Heuristic,
        };
    }

    let mut trigger_ids = Vec::new();
    if triggers.is_empty() {
        let node = manual_trigger_node(ids, 0);
        trigger_ids.push(node.id().to_string());
        nodes.push(node);
    } else {
        for (i, trigger) in triggers.iter().enumerate() {
            let node = trigger_node(trigger, ids, i);
            trigger_ids.push(node.id().to_string());
            nodes.push(node);
        }
    }

    let mut previous_id: Option<String> = None;
    for (i, source) in steps.iter().enumerate() {
        let node = step_node(source, ids, i);
        let node_id = node.id().to_string();
        nodes.push(node);

        match &previous_id {
            // First step fans in from every trigger.
            None => {
                for trigger_id in &trigger_ids {
                    edges.push(chain_edge(trigger_id, &node_id, ids));
                }
            }
            Some(prev) => edges.push(chain_edge(prev, &node_id, ids)),
        }
        previous_id = Some(node_id);
    }

    RestoredGraph {
        nodes,
        edges,
        provenance: Provenance::Heuristic,
    }
}

fn chain_edge(source: &str, target: &str, ids: &mut dyn IdGen) -> FlowEdge {
    FlowEdge {
        id: ids.next("edge"),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: Some("output".to_string()),
        target_handle: None,
    }
}

fn trigger_node(trigger: &Trigger, ids: &mut dyn IdGen, row: usize) -> FlowNode {
    FlowNode::EventSource(NodeBase {
        id: ids.next("node"),
        position: trigger_position(row),
        data: NodeData {
            label: trigger.name.clone(),
            config: EventSourceConfig {
                trigger_type: trigger.trigger_type.clone(),
                config: trigger.configuration.clone(),
            },
            timeout: None,
            retry_count: None,
        },
    })
}

fn manual_trigger_node(ids: &mut dyn IdGen, row: usize) -> FlowNode {
    FlowNode::EventSource(NodeBase {
        id: ids.next("node"),
        position: trigger_position(row),
        data: NodeData {
            label: "Manual Trigger".to_string(),
            config: EventSourceConfig {
                trigger_type: "manual".to_string(),
                config: Default::default(),
            },
            timeout: None,
            retry_count: None,
        },
    })
}

/// Best-effort backward inference of the visual kind from the configuration
/// shape. A stored fact only exists on the cache path; this is a guess and
/// collapses most kinds to `action`.
fn step_node(source: &StepSource<'_>, ids: &mut dyn IdGen, column: usize) -> FlowNode {
    let id = ids.next("node");
    let position = step_position(column);
    let cfg = source.configuration;

    if let Some(conditions) = source.conditions {
        return FlowNode::Condition(NodeBase {
            id,
            position,
            data: NodeData {
                label: source.name.to_string(),
                config: ConditionConfig {
                    condition_type: conditions.condition_type.clone(),
                    config: ConditionFields {
                        field: conditions.field.clone(),
                        value: conditions.value.clone(),
                    },
                },
                timeout: source.timeout,
                retry_count: source.retry_count,
            },
        });
    }

    if cfg.contains_key("agent_type") {
        return FlowNode::Agent(NodeBase {
            id,
            position,
            data: NodeData {
                label: source.name.to_string(),
                config: AgentConfig {
                    agent_type: config_str(cfg, "agent_type"),
                    agent_name: config_str(cfg, "agent_name"),
                    config: without_keys(cfg, &["agent_type", "agent_name"]),
                },
                timeout: source.timeout,
                retry_count: source.retry_count,
            },
        });
    }

    if cfg.contains_key("sync_mode") {
        return FlowNode::Sync(NodeBase {
            id,
            position,
            data: NodeData {
                label: source.name.to_string(),
                config: SyncConfig {
                    sync_mode: config_str(cfg, "sync_mode"),
                    config: without_keys(cfg, &["sync_mode"]),
                },
                timeout: source.timeout,
                retry_count: source.retry_count,
            },
        });
    }

    FlowNode::Action(NodeBase {
        id,
        position,
        data: NodeData {
            label: source.name.to_string(),
            config: ActionConfig {
                action_type: cfg
                    .get("action_type")
                    .and_then(Value::as_str)
                    .map(String::from),
                config: without_keys(cfg, &["action_type"]),
            },
            timeout: source.timeout,
            retry_count: source.retry_count,
        },
    })
}

fn trigger_position(row: usize) -> Position {
    Position {
        x: TRIGGER_COLUMN_X,
        y: TRIGGER_BASE_Y + row as f64 * TRIGGER_SPACING_Y,
    }
}

fn step_position(column: usize) -> Position {
    Position {
        x: STEP_BASE_X + column as f64 * STEP_SPACING_X,
        y: STEP_ROW_Y,
    }
}

fn config_str(cfg: &ConfigMap, key: &str) -> String {
    cfg.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn without_keys(cfg: &ConfigMap, keys: &[&str]) -> ConfigMap {
    cfg.iter()
        .filter(|(k, _)| !keys.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
