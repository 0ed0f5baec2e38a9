//! Controller process for the drydock fixture harness
//!
//! Owns the managed server: launches it (or attaches to a running one),
//! waits for its admin port, and plants the endpoint handoff that the
//! harness reads inside the test process. The binary in `main.rs` wires
//! this up behind a CLI.

pub mod error;
pub mod launcher;

// Re-export commonly used types
pub use error::{ControllerError, ControllerResult};
pub use launcher::ServerLauncher;
