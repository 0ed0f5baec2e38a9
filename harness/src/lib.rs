//! Test fixture harness for an administered server
//!
//! Two cooperating cores: the fixture pipeline runs a deployment's
//! prioritized setup/teardown actions around a test run with
//! all-or-nothing rollback, and the admin client registry owns the single
//! process-wide administrative connection, built lazily from the endpoint
//! handoff a controller process plants out of band.

pub mod client;
pub mod credentials;
pub mod error;
pub mod fixture;
pub mod lifecycle;
pub mod registry;
pub mod traits;

// Re-export commonly used types
pub use client::AdminClient;
pub use credentials::EnvCredentialSource;
pub use error::{HarnessError, HarnessResult};
pub use fixture::{
    DeploymentContext, FixturePipeline, PropertiesSnapshotAction, ScratchDirAction,
    WorkspaceHandle,
};
pub use lifecycle::{SuiteEvent, SuiteLifecycle};
pub use registry::AdminClientRegistry;
pub use traits::{
    CredentialSource, FixtureAction, FixtureProperties, HandoffSource, SuiteObserver,
};
