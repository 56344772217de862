//! Integration tests for graph → backend document serialization.

mod helpers;

use aether_flow::error::GraphError;
use aether_flow::id::SessionIds;
use aether_flow::restore::{self, Provenance};
use aether_flow::serialize;
use aether_flow::validate;
use helpers::*;

#[test]
fn linear_chain_orders_steps_and_wires_on_success() {
    let nodes = vec![
        trigger("t1", "Upload"),
        action("a", "A"),
        action("b", "B"),
        action("c", "C"),
    ];
    let edges = vec![
        edge_on("e1", "t1", "a", "output"),
        edge("e2", "a", "b"),
        edge("e3", "b", "c"),
    ];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Linear")).expect("should serialize");

    let names: Vec<&str> = doc.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    let orders: Vec<u32> = doc.steps.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);

    assert_eq!(doc.steps[0].on_success, "next");
    assert_eq!(doc.steps[1].on_success, "next");
    assert_eq!(doc.steps[2].on_success, "complete");
    assert!(doc.steps.iter().all(|s| s.on_failure == "abort"));
    assert!(doc.steps.iter().all(|s| s.timeout == 300 && s.retry_count == 0));
}

#[test]
fn disconnected_step_is_appended_last() {
    let nodes = vec![
        trigger("t1", "Upload"),
        action("a", "A"),
        action("b", "B"),
        action("c", "C"),
        action("d", "D"),
    ];
    let edges = vec![
        edge_on("e1", "t1", "a", "output"),
        edge("e2", "a", "b"),
        edge("e3", "b", "c"),
    ];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Linear")).unwrap();

    let names: Vec<&str> = doc.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
    // No outgoing edge, so the orphan terminates.
    assert_eq!(doc.steps[3].on_success, "complete");
}

#[test]
fn triggers_are_lowered_verbatim() {
    let nodes = vec![trigger("t1", "Document Uploaded"), action("a", "A")];
    let edges = vec![edge("e1", "t1", "a")];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Doc")).unwrap();

    assert_eq!(doc.triggers.len(), 1);
    assert_eq!(doc.triggers[0].trigger_type, "document.uploaded");
    assert_eq!(doc.triggers[0].name, "Document Uploaded");
}

#[test]
fn condition_node_emits_conditions_object() {
    let nodes = vec![
        trigger("t1", "Upload"),
        condition("c1", "Score Gate", "equals", "score", "80"),
    ];
    let edges = vec![edge("e1", "t1", "c1")];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Gate")).unwrap();

    let step = &doc.steps[0];
    assert_eq!(step.step_type, "condition");
    let conditions = step.conditions.as_ref().expect("conditions present");
    assert_eq!(conditions.condition_type, "equals");
    assert_eq!(conditions.field, "score");
    assert_eq!(conditions.value, "80");
    assert_eq!(step.configuration["field"], "score");
    assert_eq!(step.configuration["value"], "80");
}

#[test]
fn agent_step_injects_agent_fields() {
    let nodes = vec![
        trigger("t1", "Upload"),
        agent("g1", "Classify", "classifier", "invoice-clf"),
    ];
    let edges = vec![edge("e1", "t1", "g1")];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Classify")).unwrap();

    let step = &doc.steps[0];
    assert_eq!(step.step_type, "ai_agent");
    assert_eq!(step.configuration["agent_type"], "classifier");
    assert_eq!(step.configuration["agent_name"], "invoice-clf");
}

#[test]
fn branch_reconverges_after_both_arms() {
    let nodes = vec![
        trigger("t1", "Upload"),
        condition("cond", "Gate", "equals", "status", "ok"),
        action("x", "X"),
        action("y", "Y"),
        merge("m", "Join"),
    ];
    let edges = vec![
        edge("e1", "t1", "cond"),
        edge_on("e2", "cond", "x", "true"),
        edge_on("e3", "cond", "y", "false"),
        edge("e4", "x", "m"),
        edge("e5", "y", "m"),
    ];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Branch")).unwrap();

    let names: Vec<&str> = doc.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names[0], "Gate");
    assert_eq!(names[3], "Join");
    let x_pos = names.iter().position(|n| *n == "X").unwrap();
    let y_pos = names.iter().position(|n| *n == "Y").unwrap();
    assert!(x_pos < 3 && y_pos < 3);

    // The gate continues on its "true" handle; the join terminates.
    assert_eq!(doc.steps[0].on_success, "next");
    assert_eq!(doc.steps[3].on_success, "complete");
}

#[test]
fn unlabeled_step_gets_synthesized_name() {
    let nodes = vec![trigger("t1", "Upload"), action("a", "  ")];
    let edges = vec![edge("e1", "t1", "a")];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Unnamed")).unwrap();
    assert_eq!(doc.steps[0].name, "Step 1");
}

#[test]
fn metadata_is_copied_onto_the_document() {
    let nodes = vec![trigger("t1", "Upload"), action("a", "A")];
    let edges = vec![edge("e1", "t1", "a")];
    let mut m = meta("Invoice Intake");
    m.description = Some("Routes invoices".into());

    let doc = serialize::to_backend_parts(&nodes, &edges, &m).unwrap();
    assert_eq!(doc.name, "Invoice Intake");
    assert_eq!(doc.description.as_deref(), Some("Routes invoices"));
    assert_eq!(doc.workflow_type, "automation");
}

// =============================================================================
// Structural gate
// =============================================================================

#[test]
fn cyclic_graph_is_rejected_before_ordering() {
    let nodes = vec![trigger("t1", "Upload"), action("a", "A"), action("b", "B")];
    let edges = vec![
        edge("e1", "t1", "a"),
        edge("e2", "a", "b"),
        edge("e3", "b", "a"),
    ];

    let errors = serialize::to_backend_parts(&nodes, &edges, &meta("Loop")).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, GraphError::CycleDetected { .. })),
        "Expected cycle error: {:?}",
        errors
    );
}

#[test]
fn unreachable_cycle_does_not_block_serialization() {
    // The B↔C cycle hangs off no trigger, so the ordering walk never
    // enters it; both nodes are appended like any other unreached step and
    // the layout cache still restores the cycle verbatim.
    let nodes = vec![
        trigger("t1", "Upload"),
        action("a", "A"),
        action("b", "B"),
        action("c", "C"),
    ];
    let edges = vec![
        edge("e1", "t1", "a"),
        edge("e2", "b", "c"),
        edge("e3", "c", "b"),
    ];

    let doc = serialize::to_backend_parts(&nodes, &edges, &meta("Visual Cycle"))
        .expect("should serialize");

    let names: Vec<&str> = doc.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let mut ids = SessionIds::new();
    let restored = restore::from_document(&doc, &mut ids);
    assert_eq!(restored.provenance, Provenance::LayoutCache);
    assert_eq!(restored.nodes, nodes);
    assert_eq!(restored.edges, edges);
}

#[test]
fn dangling_edge_is_rejected() {
    let nodes = vec![trigger("t1", "Upload"), action("a", "A")];
    let edges = vec![edge("e1", "t1", "a"), edge("e2", "a", "ghost")];

    let errors = serialize::to_backend_parts(&nodes, &edges, &meta("Broken")).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, GraphError::DanglingEdge { .. })),
        "Expected dangling edge error: {:?}",
        errors
    );
}

// =============================================================================
// Default synthesis vs. validator
// =============================================================================

/// The serializer and validator deliberately disagree on empty graphs: the
/// validator rejects them (it is the user-facing gate), while the serializer
/// still emits a formally valid document so the backend's own minimum-shape
/// rule can never fail on a bypassed save. Both behaviors are contractual;
/// neither side should be "fixed" to match the other.
#[test]
fn empty_graph_synthesizes_defaults_while_validator_rejects_it() {
    let doc = serialize::to_backend_parts(&[], &[], &meta("Empty")).unwrap();

    assert_eq!(doc.triggers.len(), 1);
    assert_eq!(doc.triggers[0].trigger_type, "manual");
    assert_eq!(doc.triggers[0].name, "Manual Trigger");

    assert_eq!(doc.steps.len(), 1);
    assert_eq!(doc.steps[0].step_type, "custom");
    assert_eq!(doc.steps[0].order, 1);
    assert_eq!(doc.steps[0].on_success, "complete");

    let report = validate::validate_workflow(&[]);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn empty_graph_document_shape() {
    let doc = serialize::to_backend_parts(&[], &[], &meta("Empty")).unwrap();
    insta::assert_json_snapshot!("empty_graph_document", doc);
}
