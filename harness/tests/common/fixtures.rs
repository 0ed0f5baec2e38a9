//! Scripted fixture actions used by the pipeline test suite

use std::sync::{Arc, Mutex};

use harness::{FixtureAction, FixtureProperties, WorkspaceHandle};

/// Shared journal recording every action call in order
#[derive(Clone, Default)]
pub struct ActionJournal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ActionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

/// Fixture action that journals its calls and can be scripted to fail
pub struct RecordingAction {
    name: String,
    priority: i32,
    journal: ActionJournal,
    fail_setup: bool,
    fail_teardown: bool,
}

impl RecordingAction {
    pub fn new(name: &str, priority: i32, journal: &ActionJournal) -> Self {
        Self {
            name: name.to_string(),
            priority,
            journal: journal.clone(),
            fail_setup: false,
            fail_teardown: false,
        }
    }

    pub fn failing_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }

    pub fn failing_teardown(mut self) -> Self {
        self.fail_teardown = true;
        self
    }

    pub fn boxed(self) -> Box<dyn FixtureAction> {
        Box::new(self)
    }
}

impl FixtureAction for RecordingAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn setup(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        self.journal.record(format!("setup:{}", self.name));
        if self.fail_setup {
            anyhow::bail!("scripted setup failure in '{}'", self.name);
        }
        Ok(())
    }

    fn teardown(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        self.journal.record(format!("teardown:{}", self.name));
        if self.fail_teardown {
            anyhow::bail!("scripted teardown failure in '{}'", self.name);
        }
        Ok(())
    }
}

/// Fixture action that journals the ambient workspace it observes
pub struct WorkspaceProbeAction {
    journal: ActionJournal,
}

impl WorkspaceProbeAction {
    pub fn new(journal: &ActionJournal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }

    pub fn boxed(self) -> Box<dyn FixtureAction> {
        Box::new(self)
    }

    fn ambient_name() -> String {
        WorkspaceHandle::current()
            .map(|workspace| workspace.name().to_string())
            .unwrap_or_else(|| "none".to_string())
    }
}

impl FixtureAction for WorkspaceProbeAction {
    fn name(&self) -> &str {
        "workspace-probe"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn setup(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        self.journal.record(format!("setup-in:{}", Self::ambient_name()));
        Ok(())
    }

    fn teardown(&self, _properties: &FixtureProperties) -> anyhow::Result<()> {
        self.journal
            .record(format!("teardown-in:{}", Self::ambient_name()));
        Ok(())
    }
}
