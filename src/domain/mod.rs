//! Domain layer types and invariants.

pub mod resources;
pub mod search;
