//! Fixture pipeline with all-or-nothing setup semantics
//!
//! The pipeline owns the materialized execution order of a deployment's
//! fixture actions. `setup` walks the order forward and rolls back prior
//! successes when an action fails; `teardown` walks the full order in
//! reverse, attempts every action, and surfaces only the first failure.

use tracing::{debug, warn};

use crate::error::{HarnessError, HarnessResult};
use crate::fixture::context::DeploymentContext;
use crate::traits::{FixtureAction, FixtureProperties};

pub struct FixturePipeline<'ctx> {
    context: &'ctx DeploymentContext,
    actions: Vec<Box<dyn FixtureAction>>,
}

impl<'ctx> FixturePipeline<'ctx> {
    /// Materialize the execution order for a deployment's actions
    ///
    /// Actions are stable-sorted by descending priority at construction and
    /// never re-sorted afterwards: equal priorities keep their configured
    /// relative order, so repeated runs of the same configuration execute
    /// identically.
    pub fn new(context: &'ctx DeploymentContext, mut actions: Vec<Box<dyn FixtureAction>>) -> Self {
        actions.sort_by_key(|action| std::cmp::Reverse(action.priority()));
        Self { context, actions }
    }

    /// Action names in setup order, for diagnostics
    pub fn execution_order(&self) -> Vec<&str> {
        self.actions.iter().map(|action| action.name()).collect()
    }

    /// Run every action's setup in priority order
    ///
    /// All-or-nothing: if any action fails, the actions that already
    /// succeeded are rolled back (most recent first) and the original
    /// failure is returned. The failing action itself and everything after
    /// it are never touched by the rollback.
    pub fn setup(&self, properties: &FixtureProperties) -> HarnessResult<()> {
        let _workspace = self.context.workspace().enter();

        debug!(
            "🔧 Setting up {} fixture action(s) for deployment '{}'",
            self.actions.len(),
            self.context.name()
        );

        let mut active: Vec<&dyn FixtureAction> = Vec::with_capacity(self.actions.len());
        for action in &self.actions {
            debug!("Setting up fixture action '{}'", action.name());
            match action.setup(properties) {
                Ok(()) => active.push(action.as_ref()),
                Err(cause) => {
                    warn!(
                        "⚠️ Fixture action '{}' failed during setup, rolling back {} prior action(s)",
                        action.name(),
                        active.len()
                    );
                    self.roll_back(&active, properties);
                    return Err(HarnessError::SetupFailed {
                        action: action.name().to_string(),
                        cause,
                    });
                }
            }
        }

        Ok(())
    }

    /// Undo previously successful actions, most recent first
    ///
    /// Rollback failures are logged and discarded so they never mask the
    /// setup failure that triggered the rollback.
    fn roll_back(&self, active: &[&dyn FixtureAction], properties: &FixtureProperties) {
        for action in active.iter().rev() {
            if let Err(error) = action.teardown(properties) {
                warn!(
                    "Discarding rollback failure from fixture action '{}': {error:#}",
                    action.name()
                );
            }
        }
    }

    /// Run every action's teardown in reverse priority order
    ///
    /// The pass always visits the full list, even past failures, so one
    /// broken action cannot strand the resources behind it. The first
    /// failure is returned once the pass completes; later ones are logged
    /// and discarded.
    pub fn teardown(&self, properties: &FixtureProperties) -> HarnessResult<()> {
        let _workspace = self.context.workspace().enter();

        debug!(
            "🧹 Tearing down {} fixture action(s) for deployment '{}'",
            self.actions.len(),
            self.context.name()
        );

        let mut first_failure: Option<HarnessError> = None;
        for action in self.actions.iter().rev() {
            debug!("Tearing down fixture action '{}'", action.name());
            if let Err(cause) = action.teardown(properties) {
                if first_failure.is_none() {
                    first_failure = Some(HarnessError::TeardownFailed {
                        action: action.name().to_string(),
                        cause,
                    });
                } else {
                    warn!(
                        "Discarding secondary teardown failure from fixture action '{}': {cause:#}",
                        action.name()
                    );
                }
            }
        }

        match first_failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
