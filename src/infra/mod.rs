//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod memory;
pub mod resources;
pub mod telemetry;
#[cfg(feature = "web")]
pub mod web;
