//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::backend::types::{WorkflowDocument, WorkflowTemplate};
use crate::error::GraphError;
use crate::id::SessionIds;
use crate::restore::RestoredGraph;

/// Validate a canvas graph JSON: parse + completeness report + structural pass.
#[wasm_bindgen]
pub fn validate_workflow(json: &str) -> JsValue {
    let result = validate_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(json: &str) -> ValidateResult {
    let flow = match crate::graph::parse(json) {
        Ok(f) => f,
        Err(errors) => {
            return ValidateResult {
                valid: false,
                errors: vec![],
                graph_errors: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    let report = crate::validate::validate_workflow(&flow.nodes);
    let graph_errors = crate::validate::validate_graph(&flow.nodes, &flow.edges);

    ValidateResult {
        valid: report.valid && graph_errors.is_empty(),
        errors: report.errors,
        graph_errors: graph_errors.into_iter().map(ErrorDto::from).collect(),
    }
}

/// Serialize a canvas graph JSON into the backend workflow document.
/// Returns a tagged object with either `document` or `errors`.
#[wasm_bindgen]
pub fn serialize_workflow(json: &str) -> JsValue {
    let result = serialize_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn serialize_workflow_inner(json: &str) -> SerializeResult {
    let flow = match crate::graph::parse(json) {
        Ok(f) => f,
        Err(errors) => {
            return SerializeResult::Errors {
                errors: errors.into_iter().map(ErrorDto::from).collect(),
            };
        }
    };

    match crate::serialize::to_backend(&flow) {
        Ok(document) => SerializeResult::Success {
            document: Box::new(document),
        },
        Err(errors) => SerializeResult::Errors {
            errors: errors.into_iter().map(ErrorDto::from).collect(),
        },
    }
}

/// Restore an editable graph from a saved workflow document JSON.
/// Never fails structurally; malformed JSON yields an errors object.
#[wasm_bindgen]
pub fn restore_workflow(json: &str) -> JsValue {
    let result = restore_workflow_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn restore_workflow_inner(json: &str) -> RestoreResult {
    let doc = match serde_json::from_str::<WorkflowDocument>(json) {
        Ok(d) => d,
        Err(e) => {
            return RestoreResult::Errors {
                errors: vec![ErrorDto::from(GraphError::Parse(e.to_string()))],
            };
        }
    };

    let mut ids = SessionIds::new();
    RestoreResult::Success {
        graph: Box::new(crate::restore::from_document(&doc, &mut ids)),
    }
}

/// Restore an editable graph from a creation template JSON.
#[wasm_bindgen]
pub fn restore_template(json: &str) -> JsValue {
    let result = restore_template_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn restore_template_inner(json: &str) -> RestoreResult {
    let template = match serde_json::from_str::<WorkflowTemplate>(json) {
        Ok(t) => t,
        Err(e) => {
            return RestoreResult::Errors {
                errors: vec![ErrorDto::from(GraphError::Parse(e.to_string()))],
            };
        }
    };

    let mut ids = SessionIds::new();
    RestoreResult::Success {
        graph: Box::new(crate::restore::from_template(&template, &mut ids)),
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    kind: String,
    message: String,
    node_id: Option<String>,
}

impl From<GraphError> for ErrorDto {
    fn from(e: GraphError) -> Self {
        let kind = match &e {
            GraphError::Parse(_) => "parse",
            GraphError::DanglingEdge { .. } => "danglingEdge",
            GraphError::CycleDetected { .. } => "cycleDetected",
            GraphError::SelfLoop { .. } => "selfLoop",
            GraphError::DuplicateEdge { .. } => "duplicateEdge",
            GraphError::DuplicateNodeId { .. } => "duplicateNodeId",
        };
        ErrorDto {
            kind: kind.to_string(),
            message: e.to_string(),
            node_id: e.node_id().map(String::from),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResult {
    valid: bool,
    errors: Vec<String>,
    graph_errors: Vec<ErrorDto>,
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum SerializeResult {
    #[serde(rename = "success")]
    Success { document: Box<WorkflowDocument> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum RestoreResult {
    #[serde(rename = "success")]
    Success { graph: Box<RestoredGraph> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
