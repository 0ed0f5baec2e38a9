//! Trait definitions with mockall annotations for testing
//!
//! Every seam the harness depends on lives here: the fixture actions a
//! deployment contributes, the handoff channel the registry reads, the
//! credential lookup for the admin identity, and the suite lifecycle
//! observer hook.

use std::collections::BTreeMap;

use shared::errors::SharedResult;
use shared::handoff::EndpointHandoff;
use shared::types::Identity;

use crate::lifecycle::SuiteEvent;

/// Ordered key/value mapping handed unchanged to every fixture action
pub type FixtureProperties = BTreeMap<String, serde_json::Value>;

/// A reversible unit of environment configuration
///
/// Higher priorities set up earlier and tear down later. `teardown` is
/// only required to work after a successful `setup` of the same instance;
/// the pipeline never tears down an action whose setup was not reached or
/// did not succeed, except during the full end-of-unit pass.
#[mockall::automock]
pub trait FixtureAction: Send + Sync {
    /// Diagnostic name used in logs and error reports
    fn name(&self) -> &str;

    /// Relative position in the pipeline; larger values run setup first
    fn priority(&self) -> i32;

    /// Apply this action's environment changes
    fn setup(&self, properties: &FixtureProperties) -> anyhow::Result<()>;

    /// Reverse the changes applied by a successful `setup`
    fn teardown(&self, properties: &FixtureProperties) -> anyhow::Result<()>;
}

/// One-shot source of the admin endpoint handoff record
///
/// `Ok(None)` means no controller planted a configuration for this run.
/// That is a valid state, not an error: the registry reports it as an
/// absent client and callers cope without an admin connection.
#[mockall::automock]
pub trait HandoffSource: Send + Sync {
    fn read_handoff(&self) -> SharedResult<Option<EndpointHandoff>>;
}

/// Lookup for the optional caller identity used on management requests
#[mockall::automock]
pub trait CredentialSource: Send + Sync {
    fn resolve_identity(&self) -> Option<Identity>;
}

/// Observer notified of suite-scoped lifecycle events
#[mockall::automock]
pub trait SuiteObserver: Send + Sync {
    fn on_suite_event(&self, event: SuiteEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that mock traits can be instantiated
    #[test]
    fn test_mock_trait_instantiation() {
        let _mock_action = MockFixtureAction::new();
        let _mock_handoff = MockHandoffSource::new();
        let _mock_credentials = MockCredentialSource::new();
        let _mock_observer = MockSuiteObserver::new();

        // If this compiles and runs, mock generation is working
    }

    #[test]
    fn test_mock_action_scripting() {
        let mut action = MockFixtureAction::new();
        action.expect_name().return_const("scripted".to_string());
        action.expect_priority().return_const(7);
        action.expect_setup().returning(|_| Ok(()));

        assert_eq!(action.name(), "scripted");
        assert_eq!(action.priority(), 7);
        assert!(action.setup(&FixtureProperties::new()).is_ok());
    }
}
