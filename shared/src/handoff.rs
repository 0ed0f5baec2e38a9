//! Endpoint handoff channel between the controller and the harness
//!
//! The controller serializes the admin endpoint settings of the managed
//! server into a well-known file; the harness reads the file once when the
//! first test asks for the admin client. A missing file is a valid state:
//! no controller planted a configuration for this run.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{SharedError, SharedResult};
use crate::types::{AdminEndpoint, DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT, Protocol};

/// Environment variable overriding the handoff file location
pub const HANDOFF_PATH_ENV: &str = "DRYDOCK_HANDOFF";

/// Well-known file name used when no explicit path is configured
pub const HANDOFF_FILE_NAME: &str = "drydock-admin-endpoint.bin";

/// Wire record for the admin endpoint settings
///
/// Field order is fixed by the codec. Absent fields fall back to defaults
/// at resolve time rather than at write time, so the record mirrors what
/// the controller actually knew.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointHandoff {
    pub port: Option<String>,
    pub host: Option<String>,
    pub protocol: Option<String>,
    pub auth_config: Option<String>,
}

impl EndpointHandoff {
    /// Encode via bincode for the one-shot channel
    pub fn serialize(&self) -> SharedResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SharedError::HandoffEncode {
            message: e.to_string(),
        })
    }

    /// Decode a record previously written by [`EndpointHandoff::serialize`]
    pub fn deserialize(bytes: &[u8]) -> SharedResult<Self> {
        bincode::deserialize(bytes).map_err(|e| SharedError::HandoffDecode {
            message: e.to_string(),
        })
    }

    /// Validate the raw fields and apply defaults for the absent ones
    pub fn resolve(&self) -> SharedResult<AdminEndpoint> {
        let port = match &self.port {
            Some(raw) => raw.parse::<u16>().map_err(|_| SharedError::InvalidEndpoint {
                field: "port".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_ADMIN_PORT,
        };

        let host = self
            .host
            .clone()
            .unwrap_or_else(|| DEFAULT_ADMIN_HOST.to_string());

        let protocol = match &self.protocol {
            Some(raw) => raw.parse::<Protocol>().map_err(|_| SharedError::InvalidEndpoint {
                field: "protocol".to_string(),
                value: raw.clone(),
            })?,
            None => Protocol::default(),
        };

        let mut endpoint = AdminEndpoint::new(host, port, protocol);
        if let Some(raw) = &self.auth_config {
            let auth_config = Url::parse(raw).map_err(|_| SharedError::InvalidEndpoint {
                field: "auth_config".to_string(),
                value: raw.clone(),
            })?;
            endpoint = endpoint.with_auth_config(auth_config);
        }

        Ok(endpoint)
    }
}

/// File-backed handoff channel
///
/// Location resolution order: explicit path, then the `DRYDOCK_HANDOFF`
/// variable, then the well-known file name in the system temp directory.
#[derive(Debug, Clone)]
pub struct FileHandoffChannel {
    path: PathBuf,
}

impl FileHandoffChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Channel at the standard location for this system
    pub fn well_known() -> Self {
        let path = env::var(HANDOFF_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join(HANDOFF_FILE_NAME));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the planted record, `None` when the channel is empty
    pub fn read(&self) -> SharedResult<Option<EndpointHandoff>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SharedError::HandoffRead {
                    path: self.path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };

        EndpointHandoff::deserialize(&bytes).map(Some)
    }

    /// Plant a record, replacing any previous one
    pub fn write(&self, handoff: &EndpointHandoff) -> SharedResult<()> {
        let bytes = handoff.serialize()?;
        fs::write(&self.path, bytes).map_err(|e| SharedError::HandoffWrite {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Empty the channel; removing an already empty channel is fine
    pub fn remove(&self) -> SharedResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SharedError::HandoffWrite {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}
