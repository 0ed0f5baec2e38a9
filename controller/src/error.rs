//! Controller-specific error types

use std::time::Duration;

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Failed to spawn managed server: {message}")]
    SpawnFailed { message: String },

    #[error("Managed server not ready at {address} within {timeout:?}")]
    ReadinessTimeout { address: String, timeout: Duration },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Shared component error")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
