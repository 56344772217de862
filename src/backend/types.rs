//! Backend workflow document types.
//!
//! This is the bit-exact wire contract with the workflow execution API
//! (`POST /api/v1/workflows`, `PUT /api/v1/workflows/{id}`). Field names
//! here must not drift: the backend validates them as-is.

use serde::{Deserialize, Serialize};

use crate::graph::types::{ConfigMap, FlowEdge, FlowNode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub workflow_type: String,
    pub configuration: DocumentConfiguration,
    pub steps: Vec<Step>,
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentConfiguration {
    /// Opaque cache of the original visual layout, preferred on reload to
    /// avoid lossy reconstruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactflow: Option<LayoutCache>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutCache {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
    pub name: String,
    #[serde(default)]
    pub configuration: ConfigMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(rename = "type")]
    pub step_type: String,
    /// 1-based topological position.
    pub order: u32,
    #[serde(default)]
    pub configuration: ConfigMap,
    pub timeout: u64,
    pub retry_count: u32,
    pub on_success: String,
    pub on_failure: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<StepConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepConditions {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub field: String,
    pub value: String,
}

/// Metadata supplied by the builder alongside the node/edge arrays.
#[derive(Debug, Clone, Default)]
pub struct WorkflowMeta {
    pub name: String,
    pub description: Option<String>,
    pub workflow_type: String,
}

// =============================================================================
// CREATION TEMPLATES
// =============================================================================

/// Creation-time template handed to the builder before any save exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplate {
    #[serde(default)]
    pub trigger_type: Option<String>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub steps: Vec<TemplateStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateStep {
    pub name: String,
    #[serde(rename = "type", default)]
    pub step_type: Option<String>,
    #[serde(default)]
    pub configuration: ConfigMap,
    #[serde(default)]
    pub order: Option<u32>,
}
