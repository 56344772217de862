//! Step nodes → backend steps.
//!
//! One arm per node kind: the backend step type table and the snake_case
//! configuration map each kind contributes. The match is exhaustive so a new
//! node kind cannot ship without a lowering rule.

use serde_json::{json, Value};

use crate::backend::types::{Step, StepConditions};
use crate::graph::types::*;

const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_RETRY_COUNT: u32 = 0;

/// Lower one ordered step node. Returns `None` for event-source nodes, which
/// lower to triggers instead.
pub fn lower_step(node: &FlowNode, order: u32, has_next: bool) -> Option<Step> {
    let (step_type, configuration, conditions) = match node {
        FlowNode::EventSource(_) => return None,

        FlowNode::Action(n) => {
            let mut cfg = n.data.config.config.clone();
            if let Some(action_type) = &n.data.config.action_type {
                cfg.insert("action_type".into(), json!(action_type));
            }
            ("custom", cfg, None)
        }
        FlowNode::Condition(n) => {
            let fields = &n.data.config.config;
            let mut cfg = ConfigMap::new();
            cfg.insert("field".into(), json!(fields.field));
            cfg.insert("value".into(), json!(fields.value));
            let conditions = StepConditions {
                condition_type: n.data.config.condition_type.clone(),
                field: fields.field.clone(),
                value: fields.value.clone(),
            };
            ("condition", cfg, Some(conditions))
        }
        FlowNode::Agent(n) => {
            let mut cfg = n.data.config.config.clone();
            cfg.insert("agent_type".into(), json!(n.data.config.agent_type));
            cfg.insert("agent_name".into(), json!(n.data.config.agent_name));
            ("ai_agent", cfg, None)
        }
        FlowNode::Container(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            cfg.insert("image".into(), json!(c.image));
            cfg.insert("command".into(), json!(c.command));
            if let Some(resources) = &c.resources {
                cfg.insert("resources".into(), json!(resources));
            }
            if let Some(retry_strategy) = &c.retry_strategy {
                cfg.insert("retry_strategy".into(), json!(retry_strategy));
            }
            if let Some(timeout) = c.timeout {
                cfg.insert("timeout".into(), json!(timeout));
            }
            ("container", cfg, None)
        }
        FlowNode::Script(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            cfg.insert("language".into(), json!(c.language));
            cfg.insert("source".into(), json!(c.source));
            cfg.insert("args".into(), json!(c.args));
            ("script", cfg, None)
        }
        FlowNode::Http(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            cfg.insert("method".into(), json!(c.method));
            cfg.insert("url".into(), json!(c.url));
            if let Some(headers) = &c.headers {
                cfg.insert("headers".into(), Value::Object(headers.clone()));
            }
            if let Some(body) = &c.body {
                cfg.insert("body".into(), json!(body));
            }
            ("http", cfg, None)
        }
        FlowNode::AiTask(n) => {
            let c = &n.data.config;
            let mut cfg = c.config.clone();
            cfg.insert("task".into(), json!(c.task));
            if let Some(model) = &c.model {
                cfg.insert("model".into(), json!(model));
            }
            if let Some(prompt) = &c.prompt {
                cfg.insert("prompt".into(), json!(prompt));
            }
            ("ai_task", cfg, None)
        }
        FlowNode::Suspend(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            if let Some(reason) = &c.reason {
                cfg.insert("reason".into(), json!(reason));
            }
            cfg.insert("approvers".into(), json!(c.approvers));
            ("suspend", cfg, None)
        }
        FlowNode::Transform(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            cfg.insert("expression".into(), json!(c.expression));
            if let Some(output_field) = &c.output_field {
                cfg.insert("output_field".into(), json!(output_field));
            }
            ("transform", cfg, None)
        }
        FlowNode::Assembler(n) => {
            let mut cfg = n.data.config.config.clone();
            if let Some(format) = &n.data.config.format {
                cfg.insert("format".into(), json!(format));
            }
            ("assembler", cfg, None)
        }
        FlowNode::Sync(n) => {
            let mut cfg = n.data.config.config.clone();
            cfg.insert("sync_mode".into(), json!(n.data.config.sync_mode));
            ("sync", cfg, None)
        }
        FlowNode::Merge(n) => {
            let mut cfg = ConfigMap::new();
            if let Some(strategy) = &n.data.config.strategy {
                cfg.insert("strategy".into(), json!(strategy));
            }
            ("merge", cfg, None)
        }
        FlowNode::Loop(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            if let Some(collection) = &c.collection {
                cfg.insert("collection".into(), json!(collection));
            }
            if let Some(max_iterations) = c.max_iterations {
                cfg.insert("max_iterations".into(), json!(max_iterations));
            }
            ("loop", cfg, None)
        }
        FlowNode::Subworkflow(n) => {
            let c = &n.data.config;
            let mut cfg = ConfigMap::new();
            cfg.insert("workflow_id".into(), json!(c.workflow_id));
            cfg.insert("parameters".into(), Value::Object(c.parameters.clone()));
            ("subworkflow", cfg, None)
        }
        FlowNode::ErrorHandler(n) => {
            let mut cfg = n.data.config.config.clone();
            if let Some(handler_type) = &n.data.config.handler_type {
                cfg.insert("handler_type".into(), json!(handler_type));
            }
            ("error_handler", cfg, None)
        }
    };

    let label = node.label().trim();
    let name = if label.is_empty() {
        format!("Step {}", order)
    } else {
        label.to_string()
    };

    Some(Step {
        name,
        step_type: step_type.to_string(),
        order,
        configuration,
        timeout: node.data_timeout().unwrap_or(DEFAULT_TIMEOUT_SECS),
        retry_count: node.data_retry_count().unwrap_or(DEFAULT_RETRY_COUNT),
        on_success: if has_next { "next" } else { "complete" }.to_string(),
        on_failure: "abort".to_string(),
        conditions,
    })
}

/// Fallback step synthesized for a graph saved without any step node.
pub fn default_custom_step() -> Step {
    Step {
        name: "Default Step".to_string(),
        step_type: "custom".to_string(),
        order: 1,
        configuration: Default::default(),
        timeout: DEFAULT_TIMEOUT_SECS,
        retry_count: DEFAULT_RETRY_COUNT,
        on_success: "complete".to_string(),
        on_failure: "abort".to_string(),
        conditions: None,
    }
}
