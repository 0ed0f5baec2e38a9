//! Harness-specific error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Fixture action '{action}' failed during setup: {cause}")]
    SetupFailed { action: String, cause: anyhow::Error },

    #[error("Fixture action '{action}' failed during teardown: {cause}")]
    TeardownFailed { action: String, cause: anyhow::Error },

    #[error("Admin client construction failed: {message}")]
    ClientConstruction { message: String },

    #[error("Admin client is already closed")]
    ClientClosed,

    #[error("Management request failed: {message}")]
    ManagementRequest { message: String },
}

pub type HarnessResult<T> = Result<T, HarnessError>;
