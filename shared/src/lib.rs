//! Shared types for the drydock fixture harness
//!
//! Contains only the types both sides of the handoff need: the controller
//! process that plants the admin endpoint configuration and the harness
//! library that consumes it. Harness-internal types (pipeline, registry,
//! client) stay in the harness crate.

pub mod errors;
pub mod handoff;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;

// Re-export the handoff channel surface used by both processes
pub use handoff::{EndpointHandoff, FileHandoffChannel, HANDOFF_FILE_NAME, HANDOFF_PATH_ENV};
