//! Full pipeline: parse → validate → serialize → restore.

use aether_flow::graph;
use aether_flow::id::SessionIds;
use aether_flow::restore::{self, Provenance};
use aether_flow::serialize;
use aether_flow::validate;

#[test]
fn document_pipeline_round_trips() {
    let json = include_str!("fixtures/document_pipeline.json");
    let flow = graph::parse(json).expect("should parse");

    let report = validate::validate_workflow(&flow.nodes);
    assert!(report.valid, "Validation errors: {:?}", report.errors);
    let structural = validate::validate_graph(&flow.nodes, &flow.edges);
    assert!(structural.is_empty(), "Structural errors: {:?}", structural);

    let doc = serialize::to_backend(&flow).expect("should serialize");

    assert_eq!(doc.name, "Invoice Intake");
    assert_eq!(doc.triggers.len(), 1);
    assert_eq!(doc.triggers[0].trigger_type, "document.uploaded");
    assert_eq!(doc.steps.len(), 4);

    // The extraction feeds the gate; the gate continues on its "true" arm.
    assert_eq!(doc.steps[0].name, "Extract Fields");
    assert_eq!(doc.steps[0].step_type, "ai_task");
    assert_eq!(doc.steps[0].on_success, "next");
    assert_eq!(doc.steps[1].name, "Confidence Check");
    assert_eq!(doc.steps[1].step_type, "condition");
    assert_eq!(doc.steps[1].on_success, "next");
    assert!(doc.steps[1].conditions.is_some());

    let suspend = doc
        .steps
        .iter()
        .find(|s| s.name == "Manual Review")
        .expect("suspend step present");
    assert_eq!(suspend.step_type, "suspend");
    assert_eq!(suspend.on_success, "complete");
    assert_eq!(suspend.configuration["approvers"][0], "ops@aether.dev");

    // Orders are 1-based and dense.
    let orders: Vec<u32> = doc.steps.iter().map(|s| s.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);

    // Reopening the builder takes the cache path and loses nothing.
    let mut ids = SessionIds::new();
    let restored = restore::from_document(&doc, &mut ids);
    assert_eq!(restored.provenance, Provenance::LayoutCache);
    assert_eq!(restored.nodes, flow.nodes);
    assert_eq!(restored.edges, flow.edges);
}
