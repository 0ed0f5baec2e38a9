//! Suite-scoped lifecycle signals
//!
//! The surrounding test framework owns suite boundaries; this module gives
//! harness components a hook into them. The admin client registry observes
//! `SuiteFinished` to release the process-wide client exactly once per
//! suite run.

use std::sync::Arc;

use tracing::debug;

use crate::traits::SuiteObserver;

/// Suite boundary markers fired by the surrounding test framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEvent {
    SuiteStarted,
    SuiteFinished,
}

/// Dispatches suite events to registered observers in registration order
pub struct SuiteLifecycle {
    observers: Vec<Arc<dyn SuiteObserver>>,
}

impl SuiteLifecycle {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer for all subsequent events
    pub fn register(&mut self, observer: Arc<dyn SuiteObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver `event` to every registered observer
    pub fn fire(&self, event: SuiteEvent) {
        debug!(
            "📣 Dispatching {:?} to {} observer(s)",
            event,
            self.observers.len()
        );
        for observer in &self.observers {
            observer.on_suite_event(event);
        }
    }
}

impl Default for SuiteLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
