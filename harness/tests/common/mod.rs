//! Common test utilities shared across harness test suites

pub mod fixtures;
pub mod helpers;

pub use fixtures::{ActionJournal, RecordingAction, WorkspaceProbeAction};
pub use helpers::{deployment_in, sample_properties};
