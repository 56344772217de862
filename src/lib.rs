pub mod backend;
pub mod error;
pub mod graph;
pub mod id;
pub mod restore;
pub mod serialize;
pub mod validate;
pub mod wasm;
