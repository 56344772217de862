//! Event-source nodes → backend triggers.

use crate::backend::types::Trigger;
use crate::graph::types::{EventSourceConfig, NodeBase};

pub fn lower_trigger(node: &NodeBase<EventSourceConfig>) -> Trigger {
    Trigger {
        trigger_type: node.data.config.trigger_type.clone(),
        name: node.data.label.clone(),
        configuration: node.data.config.config.clone(),
    }
}

/// Fallback trigger synthesized for a graph saved without any event source.
pub fn default_manual_trigger() -> Trigger {
    Trigger {
        trigger_type: "manual".to_string(),
        name: "Manual Trigger".to_string(),
        configuration: Default::default(),
    }
}
