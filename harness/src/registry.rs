//! Process-wide admin client registry
//!
//! Owns the single lazily-built [`AdminClient`] for this process. The
//! first `acquire` after startup (or after a `release`) reads the handoff
//! channel, applies endpoint defaults and builds the client; later calls
//! return the cached handle. One mutex guards both the check-and-build and
//! the check-and-clear paths, so concurrent first callers observe exactly
//! one handoff read and one construction.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use shared::errors::SharedResult;
use shared::handoff::{EndpointHandoff, FileHandoffChannel};

use crate::client::AdminClient;
use crate::credentials::EnvCredentialSource;
use crate::error::{HarnessError, HarnessResult};
use crate::lifecycle::SuiteEvent;
use crate::traits::{CredentialSource, HandoffSource, SuiteObserver};

/// The file-backed channel is the production handoff source
impl HandoffSource for FileHandoffChannel {
    fn read_handoff(&self) -> SharedResult<Option<EndpointHandoff>> {
        self.read()
    }
}

pub struct AdminClientRegistry<S: HandoffSource, C: CredentialSource> {
    handoff_source: S,
    credentials: C,
    cached: Mutex<Option<Arc<AdminClient>>>,
}

impl AdminClientRegistry<FileHandoffChannel, EnvCredentialSource> {
    /// Registry wired to the standard handoff location and env credentials
    pub fn well_known() -> Self {
        Self::new(FileHandoffChannel::well_known(), EnvCredentialSource)
    }
}

impl<S: HandoffSource, C: CredentialSource> AdminClientRegistry<S, C> {
    pub fn new(handoff_source: S, credentials: C) -> Self {
        Self {
            handoff_source,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Return the process-wide admin client, building it on first use
    ///
    /// `Ok(None)` means no handoff was planted for this run: the managed
    /// server has no reachable admin endpoint and callers must cope
    /// without one. Construction failures leave the cache empty, so a
    /// later call retries against a possibly corrected handoff.
    pub fn acquire(&self) -> HarnessResult<Option<Arc<AdminClient>>> {
        let mut cached = self
            .cached
            .lock()
            .expect("admin client registry mutex poisoned");

        if let Some(client) = cached.as_ref() {
            return Ok(Some(Arc::clone(client)));
        }

        let handoff = match self.handoff_source.read_handoff() {
            Ok(Some(handoff)) => handoff,
            Ok(None) => {
                debug!("No admin endpoint handoff planted, registry stays empty");
                return Ok(None);
            }
            Err(e) => {
                return Err(HarnessError::ClientConstruction {
                    message: format!("handoff channel unreadable: {e}"),
                });
            }
        };

        let endpoint = handoff
            .resolve()
            .map_err(|e| HarnessError::ClientConstruction {
                message: e.to_string(),
            })?;
        let identity = self.credentials.resolve_identity();

        let client = Arc::new(AdminClient::connect(endpoint, identity)?);
        *cached = Some(Arc::clone(&client));
        info!("✅ Admin client registered for this process");

        Ok(Some(client))
    }

    /// Close and forget the cached client; a no-op when none was built
    ///
    /// The next `acquire` reads the handoff channel again from scratch
    /// rather than assuming its content is unchanged.
    pub fn release(&self) {
        let mut cached = self
            .cached
            .lock()
            .expect("admin client registry mutex poisoned");

        if let Some(client) = cached.take() {
            client.close();
            info!("♻️ Released cached admin client");
        }
    }
}

impl<S: HandoffSource, C: CredentialSource> SuiteObserver for AdminClientRegistry<S, C> {
    /// End of suite releases the cached client; other events are ignored
    fn on_suite_event(&self, event: SuiteEvent) {
        if event == SuiteEvent::SuiteFinished {
            self.release();
        }
    }
}
