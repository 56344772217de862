//! Backend workflow API contract types.

pub mod types;

pub use types::*;
