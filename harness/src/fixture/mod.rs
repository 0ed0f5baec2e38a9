//! Fixture lifecycle orchestration
//!
//! A deployment declares prioritized [`FixtureAction`]s; the
//! [`FixturePipeline`] materializes their execution order and runs setup
//! and teardown around the test run with all-or-nothing semantics. The
//! [`DeploymentContext`] anchors the pipeline to a workspace directory
//! that actions reach through the thread-ambient boundary in [`context`].
//!
//! [`FixtureAction`]: crate::traits::FixtureAction

pub mod actions;
pub mod context;
pub mod pipeline;

pub use actions::{PropertiesSnapshotAction, ScratchDirAction};
pub use context::{DeploymentContext, WorkspaceGuard, WorkspaceHandle};
pub use pipeline::FixturePipeline;
