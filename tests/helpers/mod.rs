#![allow(dead_code)]

use serde_json::json;

use aether_flow::backend::types::WorkflowMeta;
use aether_flow::graph::types::*;

// =============================================================================
// Metadata builders
// =============================================================================

pub fn meta(name: &str) -> WorkflowMeta {
    WorkflowMeta {
        name: name.into(),
        description: None,
        workflow_type: "automation".into(),
    }
}

// =============================================================================
// Node builders
// =============================================================================

fn data<C>(label: &str, config: C) -> NodeData<C> {
    NodeData {
        label: label.into(),
        config,
        timeout: None,
        retry_count: None,
    }
}

fn base<C>(id: &str, config: C, label: &str) -> NodeBase<C> {
    NodeBase {
        id: id.into(),
        position: Position { x: 0.0, y: 0.0 },
        data: data(label, config),
    }
}

pub fn trigger(id: &str, label: &str) -> FlowNode {
    FlowNode::EventSource(base(
        id,
        EventSourceConfig {
            trigger_type: "document.uploaded".into(),
            config: Default::default(),
        },
        label,
    ))
}

pub fn action(id: &str, label: &str) -> FlowNode {
    FlowNode::Action(base(
        id,
        ActionConfig {
            action_type: None,
            config: Default::default(),
        },
        label,
    ))
}

pub fn condition(id: &str, label: &str, ctype: &str, field: &str, value: &str) -> FlowNode {
    FlowNode::Condition(base(
        id,
        ConditionConfig {
            condition_type: ctype.into(),
            config: ConditionFields {
                field: field.into(),
                value: value.into(),
            },
        },
        label,
    ))
}

pub fn agent(id: &str, label: &str, agent_type: &str, agent_name: &str) -> FlowNode {
    FlowNode::Agent(base(
        id,
        AgentConfig {
            agent_type: agent_type.into(),
            agent_name: agent_name.into(),
            config: Default::default(),
        },
        label,
    ))
}

pub fn sync(id: &str, label: &str, mode: &str) -> FlowNode {
    FlowNode::Sync(base(
        id,
        SyncConfig {
            sync_mode: mode.into(),
            config: Default::default(),
        },
        label,
    ))
}

pub fn merge(id: &str, label: &str) -> FlowNode {
    FlowNode::Merge(base(id, MergeConfig { strategy: None }, label))
}

pub fn container(id: &str, label: &str, image: &str) -> FlowNode {
    FlowNode::Container(base(
        id,
        ContainerConfig {
            image: image.into(),
            command: vec!["run".into()],
            resources: None,
            retry_strategy: None,
            timeout: None,
        },
        label,
    ))
}

pub fn script(id: &str, label: &str, source: &str) -> FlowNode {
    FlowNode::Script(base(
        id,
        ScriptConfig {
            language: "python".into(),
            source: source.into(),
            args: vec![],
        },
        label,
    ))
}

pub fn ai_task(id: &str, label: &str, task: &str) -> FlowNode {
    FlowNode::AiTask(base(
        id,
        AiTaskConfig {
            task: task.into(),
            model: Some("aether-large".into()),
            prompt: None,
            config: Default::default(),
        },
        label,
    ))
}

// =============================================================================
// Edge builders
// =============================================================================

pub fn edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: None,
    }
}

pub fn edge_on(id: &str, source: &str, target: &str, handle: &str) -> FlowEdge {
    FlowEdge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        source_handle: Some(handle.into()),
        target_handle: None,
    }
}

// =============================================================================
// Config map helpers
// =============================================================================

pub fn config_map(entries: &[(&str, &str)]) -> ConfigMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
}
