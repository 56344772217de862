//! Rust types mirroring the canvas workflow JSON.
//!
//! These types are the serde target for the builder's React-flow graph.
//! Field names are camelCase on the wire; the backend document in
//! `crate::backend` uses snake_case. When node kinds or config shapes
//! change, also review the validate/serialize/restore modules.

use serde::{Deserialize, Serialize};

pub type ConfigMap = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// TOP-LEVEL CANVAS GRAPH
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default = "default_workflow_type")]
    pub workflow_type: String,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

fn default_workflow_type() -> String {
    "automation".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// Canvas coordinate. Presentation-only; never semantically meaningful
/// to execution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// =============================================================================
// NODE BASE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData<C> {
    pub label: String,
    pub config: C,
    /// Step timeout in seconds; serializer substitutes 300 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Step retry count; serializer substitutes 0 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBase<C> {
    pub id: String,
    pub position: Position,
    pub data: NodeData<C>,
}

// =============================================================================
// FLOW NODE — tagged union over the closed set of node kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FlowNode {
    // Trigger
    #[serde(rename = "eventSource")]
    EventSource(NodeBase<EventSourceConfig>),

    // Steps
    #[serde(rename = "action")]
    Action(NodeBase<ActionConfig>),
    #[serde(rename = "condition")]
    Condition(NodeBase<ConditionConfig>),
    #[serde(rename = "agent")]
    Agent(NodeBase<AgentConfig>),
    #[serde(rename = "container")]
    Container(NodeBase<ContainerConfig>),
    #[serde(rename = "script")]
    Script(NodeBase<ScriptConfig>),
    #[serde(rename = "http")]
    Http(NodeBase<HttpConfig>),
    #[serde(rename = "aiTask")]
    AiTask(NodeBase<AiTaskConfig>),
    #[serde(rename = "suspend")]
    Suspend(NodeBase<SuspendConfig>),
    #[serde(rename = "transform")]
    Transform(NodeBase<TransformConfig>),
    #[serde(rename = "assembler")]
    Assembler(NodeBase<AssemblerConfig>),
    #[serde(rename = "sync")]
    Sync(NodeBase<SyncConfig>),
    #[serde(rename = "merge")]
    Merge(NodeBase<MergeConfig>),
    #[serde(rename = "loop")]
    Loop(NodeBase<LoopConfig>),
    #[serde(rename = "subworkflow")]
    Subworkflow(NodeBase<SubworkflowConfig>),
    #[serde(rename = "errorHandler")]
    ErrorHandler(NodeBase<ErrorHandlerConfig>),
}

impl FlowNode {
    pub fn id(&self) -> &str {
        match self {
            FlowNode::EventSource(n) => &n.id,
            FlowNode::Action(n) => &n.id,
            FlowNode::Condition(n) => &n.id,
            FlowNode::Agent(n) => &n.id,
            FlowNode::Container(n) => &n.id,
            FlowNode::Script(n) => &n.id,
            FlowNode::Http(n) => &n.id,
            FlowNode::AiTask(n) => &n.id,
            FlowNode::Suspend(n) => &n.id,
            FlowNode::Transform(n) => &n.id,
            FlowNode::Assembler(n) => &n.id,
            FlowNode::Sync(n) => &n.id,
            FlowNode::Merge(n) => &n.id,
            FlowNode::Loop(n) => &n.id,
            FlowNode::Subworkflow(n) => &n.id,
            FlowNode::ErrorHandler(n) => &n.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FlowNode::EventSource(n) => &n.data.label,
            FlowNode::Action(n) => &n.data.label,
            FlowNode::Condition(n) => &n.data.label,
            FlowNode::Agent(n) => &n.data.label,
            FlowNode::Container(n) => &n.data.label,
            FlowNode::Script(n) => &n.data.label,
            FlowNode::Http(n) => &n.data.label,
            FlowNode::AiTask(n) => &n.data.label,
            FlowNode::Suspend(n) => &n.data.label,
            FlowNode::Transform(n) => &n.data.label,
            FlowNode::Assembler(n) => &n.data.label,
            FlowNode::Sync(n) => &n.data.label,
            FlowNode::Merge(n) => &n.data.label,
            FlowNode::Loop(n) => &n.data.label,
            FlowNode::Subworkflow(n) => &n.data.label,
            FlowNode::ErrorHandler(n) => &n.data.label,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            FlowNode::EventSource(_) => "eventSource",
            FlowNode::Action(_) => "action",
            FlowNode::Condition(_) => "condition",
            FlowNode::Agent(_) => "agent",
            FlowNode::Container(_) => "container",
            FlowNode::Script(_) => "script",
            FlowNode::Http(_) => "http",
            FlowNode::AiTask(_) => "aiTask",
            FlowNode::Suspend(_) => "suspend",
            FlowNode::Transform(_) => "transform",
            FlowNode::Assembler(_) => "assembler",
            FlowNode::Sync(_) => "sync",
            FlowNode::Merge(_) => "merge",
            FlowNode::Loop(_) => "loop",
            FlowNode::Subworkflow(_) => "subworkflow",
            FlowNode::ErrorHandler(_) => "errorHandler",
        }
    }

    pub fn position(&self) -> Position {
        match self {
            FlowNode::EventSource(n) => n.position,
            FlowNode::Action(n) => n.position,
            FlowNode::Condition(n) => n.position,
            FlowNode::Agent(n) => n.position,
            FlowNode::Container(n) => n.position,
            FlowNode::Script(n) => n.position,
            FlowNode::Http(n) => n.position,
            FlowNode::AiTask(n) => n.position,
            FlowNode::Suspend(n) => n.position,
            FlowNode::Transform(n) => n.position,
            FlowNode::Assembler(n) => n.position,
            FlowNode::Sync(n) => n.position,
            FlowNode::Merge(n) => n.position,
            FlowNode::Loop(n) => n.position,
            FlowNode::Subworkflow(n) => n.position,
            FlowNode::ErrorHandler(n) => n.position,
        }
    }

    pub fn data_timeout(&self) -> Option<u64> {
        match self {
            FlowNode::EventSource(n) => n.data.timeout,
            FlowNode::Action(n) => n.data.timeout,
            FlowNode::Condition(n) => n.data.timeout,
            FlowNode::Agent(n) => n.data.timeout,
            FlowNode::Container(n) => n.data.timeout,
            FlowNode::Script(n) => n.data.timeout,
            FlowNode::Http(n) => n.data.timeout,
            FlowNode::AiTask(n) => n.data.timeout,
            FlowNode::Suspend(n) => n.data.timeout,
            FlowNode::Transform(n) => n.data.timeout,
            FlowNode::Assembler(n) => n.data.timeout,
            FlowNode::Sync(n) => n.data.timeout,
            FlowNode::Merge(n) => n.data.timeout,
            FlowNode::Loop(n) => n.data.timeout,
            FlowNode::Subworkflow(n) => n.data.timeout,
            FlowNode::ErrorHandler(n) => n.data.timeout,
        }
    }

    pub fn data_retry_count(&self) -> Option<u32> {
        match self {
            FlowNode::EventSource(n) => n.data.retry_count,
            FlowNode::Action(n) => n.data.retry_count,
            FlowNode::Condition(n) => n.data.retry_count,
            FlowNode::Agent(n) => n.data.retry_count,
            FlowNode::Container(n) => n.data.retry_count,
            FlowNode::Script(n) => n.data.retry_count,
            FlowNode::Http(n) => n.data.retry_count,
            FlowNode::AiTask(n) => n.data.retry_count,
            FlowNode::Suspend(n) => n.data.retry_count,
            FlowNode::Transform(n) => n.data.retry_count,
            FlowNode::Assembler(n) => n.data.retry_count,
            FlowNode::Sync(n) => n.data.retry_count,
            FlowNode::Merge(n) => n.data.retry_count,
            FlowNode::Loop(n) => n.data.retry_count,
            FlowNode::Subworkflow(n) => n.data.retry_count,
            FlowNode::ErrorHandler(n) => n.data.retry_count,
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, FlowNode::EventSource(_))
    }
}

// =============================================================================
// TRIGGER CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSourceConfig {
    #[serde(default = "default_trigger_type")]
    pub trigger_type: String,
    #[serde(default)]
    pub config: ConfigMap,
}

fn default_trigger_type() -> String {
    "manual".to_string()
}

// =============================================================================
// STEP CONFIGS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default)]
    pub config: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionConfig {
    #[serde(default = "default_condition_type")]
    pub condition_type: String,
    #[serde(default)]
    pub config: ConditionFields,
}

fn default_condition_type() -> String {
    "equals".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConditionFields {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    #[serde(default)]
    pub agent_type: String,
    #[serde(default)]
    pub agent_name: String,
    #[serde(default)]
    pub config: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConfig {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    #[serde(default = "default_script_language")]
    pub language: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_script_language() -> String {
    "python".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    #[serde(default = "default_http_method")]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<ConfigMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

fn default_http_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiTaskConfig {
    #[serde(default)]
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub config: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub approvers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    #[serde(default)]
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub config: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(default = "default_sync_mode")]
    pub sync_mode: String,
    #[serde(default)]
    pub config: ConfigMap,
}

fn default_sync_mode() -> String {
    "wait_all".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubworkflowConfig {
    #[serde(default)]
    pub workflow_id: String,
    #[serde(default)]
    pub parameters: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandlerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_type: Option<String>,
    #[serde(default)]
    pub config: ConfigMap,
}
