//! Shared error types for the fixture harness system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Handoff read failed at {path}: {message}")]
    HandoffRead { path: String, message: String },

    #[error("Handoff write failed at {path}: {message}")]
    HandoffWrite { path: String, message: String },

    #[error("Handoff encoding failed: {message}")]
    HandoffEncode { message: String },

    #[error("Handoff decoding failed: {message}")]
    HandoffDecode { message: String },

    #[error("Invalid endpoint configuration: {field} = {value}")]
    InvalidEndpoint { field: String, value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
