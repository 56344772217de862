//! Node/edge id generation for reconstructed graphs.
//!
//! Ids are minted by a caller-supplied generator rather than module-level
//! state, so two builder sessions can never collide and tests can inject a
//! deterministic source.

/// Source of fresh element ids for one builder session.
pub trait IdGen {
    fn next(&mut self, prefix: &str) -> String;
}

/// Monotonic counter scoped to a single builder session.
#[derive(Debug, Default)]
pub struct SessionIds {
    counter: u64,
}

impl SessionIds {
    pub fn new() -> Self {
        SessionIds { counter: 0 }
    }
}

impl IdGen for SessionIds {
    fn next(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}-{}", prefix, self.counter)
    }
}
