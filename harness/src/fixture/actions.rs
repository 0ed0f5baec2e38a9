//! Stock fixture actions
//!
//! Small reusable actions most deployments want: a scratch directory inside
//! the deployment workspace, and a JSON snapshot of the fixture properties
//! for post-mortem inspection. Both resolve their target through the
//! ambient workspace boundary and fail when none is active.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use crate::fixture::context::WorkspaceHandle;
use crate::traits::{FixtureAction, FixtureProperties};

fn ambient_workspace_root(action: &str) -> anyhow::Result<PathBuf> {
    let workspace = WorkspaceHandle::current().with_context(|| {
        format!("no deployment workspace is active for fixture action '{action}'")
    })?;
    Ok(workspace.root().to_path_buf())
}

/// Creates a scratch directory inside the deployment workspace
///
/// Teardown removes the directory again, contents included.
pub struct ScratchDirAction {
    dir_name: String,
    priority: i32,
}

impl ScratchDirAction {
    pub const DEFAULT_PRIORITY: i32 = 100;

    pub fn new(dir_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            priority: Self::DEFAULT_PRIORITY,
        }
    }

    /// Configure the pipeline priority (fluent API)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl FixtureAction for ScratchDirAction {
    fn name(&self) -> &str {
        "scratch-dir"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn setup(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        let path = ambient_workspace_root(self.name())?.join(&self.dir_name);
        fs::create_dir_all(&path)
            .with_context(|| format!("creating scratch directory {}", path.display()))?;
        debug!("📁 Created scratch directory {}", path.display());
        Ok(())
    }

    fn teardown(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        let path = ambient_workspace_root(self.name())?.join(&self.dir_name);
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                debug!("🗑️ Removed scratch directory {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("removing scratch directory {}", path.display()))
            }
        }
    }
}

/// Persists the fixture properties as JSON into the workspace
///
/// Written during setup so the exact mapping every action saw survives the
/// run; removed again on teardown.
pub struct PropertiesSnapshotAction {
    file_name: String,
    priority: i32,
}

impl PropertiesSnapshotAction {
    pub const DEFAULT_PRIORITY: i32 = 50;
    pub const DEFAULT_FILE_NAME: &'static str = "fixture-properties.json";

    pub fn new() -> Self {
        Self {
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
            priority: Self::DEFAULT_PRIORITY,
        }
    }

    /// Configure the snapshot file name (fluent API)
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Configure the pipeline priority (fluent API)
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for PropertiesSnapshotAction {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureAction for PropertiesSnapshotAction {
    fn name(&self) -> &str {
        "properties-snapshot"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn setup(&self, properties: &FixtureProperties) -> anyhow::Result<()> {
        let path = ambient_workspace_root(self.name())?.join(&self.file_name);
        let json =
            serde_json::to_string_pretty(properties).context("serializing fixture properties")?;
        fs::write(&path, json)
            .with_context(|| format!("writing properties snapshot {}", path.display()))?;
        debug!("📸 Wrote properties snapshot {}", path.display());
        Ok(())
    }

    fn teardown(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        let path = ambient_workspace_root(self.name())?.join(&self.file_name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("🗑️ Removed properties snapshot {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("removing properties snapshot {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scratch_dir_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = WorkspaceHandle::new("scratch-test", dir.path());
        let _guard = workspace.enter();

        let action = ScratchDirAction::new("scratch");
        let properties = FixtureProperties::new();

        action.setup(&properties).unwrap();
        assert!(dir.path().join("scratch").is_dir());

        action.teardown(&properties).unwrap();
        assert!(!dir.path().join("scratch").exists());
    }

    #[test]
    fn test_scratch_dir_teardown_tolerates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = WorkspaceHandle::new("scratch-test", dir.path());
        let _guard = workspace.enter();

        let action = ScratchDirAction::new("never-created");
        assert!(action.teardown(&FixtureProperties::new()).is_ok());
    }

    #[test]
    fn test_actions_fail_without_active_workspace() {
        let action = ScratchDirAction::new("scratch");
        let result = action.setup(&FixtureProperties::new());

        let message = result.unwrap_err().to_string();
        assert!(message.contains("no deployment workspace is active"));
    }

    #[test]
    fn test_snapshot_writes_properties_json() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = WorkspaceHandle::new("snapshot-test", dir.path());
        let _guard = workspace.enter();

        let mut properties = FixtureProperties::new();
        properties.insert("server.profile".to_string(), json!("full-ha"));
        properties.insert("deployment.timeout".to_string(), json!(30));

        let action = PropertiesSnapshotAction::new();
        action.setup(&properties).unwrap();

        let snapshot_path = dir.path().join(PropertiesSnapshotAction::DEFAULT_FILE_NAME);
        let written = fs::read_to_string(&snapshot_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed["server.profile"], json!("full-ha"));
        assert_eq!(parsed["deployment.timeout"], json!(30));

        action.teardown(&properties).unwrap();
        assert!(!snapshot_path.exists());
    }

    #[test]
    fn test_snapshot_file_name_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let workspace = WorkspaceHandle::new("snapshot-test", dir.path());
        let _guard = workspace.enter();

        let action = PropertiesSnapshotAction::new().with_file_name("custom.json");
        action.setup(&FixtureProperties::new()).unwrap();

        assert!(dir.path().join("custom.json").is_file());
    }

    #[test]
    fn test_default_priorities_put_scratch_dir_first() {
        let scratch = ScratchDirAction::new("scratch");
        let snapshot = PropertiesSnapshotAction::new();

        assert!(scratch.priority() > snapshot.priority());
    }
}
