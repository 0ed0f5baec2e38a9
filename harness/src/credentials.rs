//! Caller identity resolution for management requests
//!
//! The identity travels out of band next to the handoff record, never
//! inside it: the operator exports environment variables (or puts them in
//! a `.env` file) and the harness picks them up when the admin client is
//! built. An absent username means anonymous management access.

use tracing::debug;

use shared::types::Identity;

use crate::traits::CredentialSource;

/// Environment variable holding the admin username
pub const ADMIN_USERNAME_ENV: &str = "DRYDOCK_ADMIN_USERNAME";

/// Environment variable holding the admin password
pub const ADMIN_PASSWORD_ENV: &str = "DRYDOCK_ADMIN_PASSWORD";

/// Credential source backed by `.env` plus the process environment
pub struct EnvCredentialSource;

impl EnvCredentialSource {
    /// Load `.env` if present; variables already set take precedence
    fn init_env() {
        let _ = dotenv::dotenv();
    }
}

impl CredentialSource for EnvCredentialSource {
    fn resolve_identity(&self) -> Option<Identity> {
        Self::init_env();

        let username = match std::env::var(ADMIN_USERNAME_ENV) {
            Ok(username) if !username.is_empty() => username,
            _ => {
                debug!("No admin identity configured, management requests stay anonymous");
                return None;
            }
        };
        let password = std::env::var(ADMIN_PASSWORD_ENV).unwrap_or_default();

        debug!("🔑 Resolved admin identity '{}'", username);
        Some(Identity::new(username, password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single test covering both branches: parallel tests in this binary
    /// must not race on the shared process environment.
    #[test]
    fn test_identity_resolution_from_environment() {
        unsafe {
            std::env::remove_var(ADMIN_USERNAME_ENV);
            std::env::remove_var(ADMIN_PASSWORD_ENV);
        }
        assert_eq!(EnvCredentialSource.resolve_identity(), None);

        unsafe {
            std::env::set_var(ADMIN_USERNAME_ENV, "admin");
            std::env::set_var(ADMIN_PASSWORD_ENV, "s3cret");
        }
        assert_eq!(
            EnvCredentialSource.resolve_identity(),
            Some(Identity::new("admin", "s3cret"))
        );

        // Username alone is enough; the password defaults to empty
        unsafe {
            std::env::remove_var(ADMIN_PASSWORD_ENV);
        }
        assert_eq!(
            EnvCredentialSource.resolve_identity(),
            Some(Identity::new("admin", ""))
        );

        unsafe {
            std::env::remove_var(ADMIN_USERNAME_ENV);
        }
    }
}
