//! Administrative client for the managed server
//!
//! Wraps the HTTP transport used to submit opaque management operations to
//! the resolved admin endpoint. Instances are handed out by the registry
//! as a process-wide singleton; `close` drops the transport and is safe to
//! call more than once.

use std::sync::Mutex;
use std::time::Duration;

use tracing::{debug, info};

use shared::types::{AdminEndpoint, Identity};

use crate::error::{HarnessError, HarnessResult};

/// Live connection handle to the managed server's admin endpoint
#[derive(Debug)]
pub struct AdminClient {
    endpoint: AdminEndpoint,
    identity: Option<Identity>,
    management_url: String,
    /// HTTP connection pool; `None` once the client is closed
    transport: Mutex<Option<reqwest::Client>>,
}

impl AdminClient {
    /// Request timeout applied to every management call
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build the transport for an endpoint, with an optional caller identity
    pub fn connect(endpoint: AdminEndpoint, identity: Option<Identity>) -> HarnessResult<Self> {
        let transport = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HarnessError::ClientConstruction {
                message: format!("HTTP transport setup failed: {e}"),
            })?;

        let management_url = endpoint.management_url();
        info!("🔗 Admin client connected to {}", endpoint);

        Ok(Self {
            endpoint,
            identity,
            management_url,
            transport: Mutex::new(Some(transport)),
        })
    }

    pub fn endpoint(&self) -> &AdminEndpoint {
        &self.endpoint
    }

    /// Whether `close` has already dropped the transport
    pub fn is_closed(&self) -> bool {
        self.transport
            .lock()
            .expect("admin client transport mutex poisoned")
            .is_none()
    }

    /// Submit an opaque management operation and return the server's reply
    ///
    /// The operation encoding belongs to the caller; the client only moves
    /// JSON across the wire and applies the optional basic-auth identity.
    pub async fn execute(&self, operation: &serde_json::Value) -> HarnessResult<serde_json::Value> {
        let transport = {
            let guard = self
                .transport
                .lock()
                .expect("admin client transport mutex poisoned");
            guard.clone().ok_or(HarnessError::ClientClosed)?
        };

        debug!("📤 Executing management operation against {}", self.management_url);

        let mut request = transport.post(&self.management_url).json(operation);
        if let Some(identity) = &self.identity {
            request = request.basic_auth(&identity.username, Some(&identity.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| HarnessError::ManagementRequest {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarnessError::ManagementRequest {
                message: format!("management endpoint returned status {status}"),
            });
        }

        response
            .json()
            .await
            .map_err(|e| HarnessError::ManagementRequest {
                message: format!("invalid management response: {e}"),
            })
    }

    /// Drop the underlying transport; safe to call more than once
    pub fn close(&self) {
        let mut guard = self
            .transport
            .lock()
            .expect("admin client transport mutex poisoned");
        if guard.take().is_some() {
            info!("🛑 Admin client to {} closed", self.endpoint);
        }
    }
}
