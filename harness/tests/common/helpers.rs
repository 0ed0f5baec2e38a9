//! Helper functions for harness integration tests

use tempfile::TempDir;

use harness::{DeploymentContext, FixtureProperties, WorkspaceHandle};

/// Deployment context anchored in a fresh temporary workspace
pub fn deployment_in(dir: &TempDir) -> DeploymentContext {
    DeploymentContext::new("integration", WorkspaceHandle::new("integration", dir.path()))
}

/// Properties mapping with a couple of representative entries
pub fn sample_properties() -> FixtureProperties {
    let mut properties = FixtureProperties::new();
    properties.insert(
        "server.profile".to_string(),
        serde_json::json!("standalone-full"),
    );
    properties.insert("deployment.timeout".to_string(), serde_json::json!(30));
    properties
}
