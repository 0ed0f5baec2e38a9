//! Core types shared between the controller and the test harness

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Host used when the handoff record carries none
pub const DEFAULT_ADMIN_HOST: &str = "localhost";

/// Management port used when the handoff record carries none
pub const DEFAULT_ADMIN_PORT: u16 = 9990;

/// Transport protocol for the management endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Https => write!(f, "https"),
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(format!("Unknown protocol: {s}")),
        }
    }
}

/// Resolved administrative endpoint of the managed server
///
/// Built from an [`crate::handoff::EndpointHandoff`] record with defaults
/// applied; immutable afterwards. The wire record keeps raw text fields,
/// this type holds the validated values.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminEndpoint {
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,
    pub auth_config: Option<Url>,
}

impl AdminEndpoint {
    pub fn new(host: impl Into<String>, port: u16, protocol: Protocol) -> Self {
        Self {
            host: host.into(),
            port,
            protocol,
            auth_config: None,
        }
    }

    pub fn with_auth_config(mut self, auth_config: Url) -> Self {
        self.auth_config = Some(auth_config);
        self
    }

    /// Base URL of the management API on this endpoint
    pub fn management_url(&self) -> String {
        format!("{}://{}:{}/management", self.protocol, self.host, self.port)
    }
}

impl Default for AdminEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_HOST, DEFAULT_ADMIN_PORT, Protocol::Http)
    }
}

impl fmt::Display for AdminEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Caller identity for authenticated management requests
///
/// Supplied out of band next to the handoff record, never inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub username: String,
    pub password: String,
}

impl Identity {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
