//! Deployment context and the ambient workspace boundary
//!
//! Each deployment owns a named workspace directory. While its fixture
//! actions run, that workspace is the thread's ambient one, so action code
//! can find it without the pipeline threading paths through every call.
//! The previously active workspace is restored on every exit path,
//! panics included.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

thread_local! {
    /// Ambient workspace for the current thread. Pipelines running on
    /// distinct threads swap independent slots.
    static ACTIVE_WORKSPACE: RefCell<Option<WorkspaceHandle>> = const { RefCell::new(None) };
}

/// Named per-deployment workspace directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceHandle {
    name: String,
    root: PathBuf,
}

impl WorkspaceHandle {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace currently active on this thread, if any
    pub fn current() -> Option<WorkspaceHandle> {
        ACTIVE_WORKSPACE.with(|slot| slot.borrow().clone())
    }

    /// Make this workspace the thread's ambient one until the guard drops
    ///
    /// The previously active workspace (including none) comes back when the
    /// returned guard goes out of scope, so an early return or panic inside
    /// the guarded region cannot leave the boundary switched.
    pub fn enter(&self) -> WorkspaceGuard {
        let previous = ACTIVE_WORKSPACE.with(|slot| slot.borrow_mut().replace(self.clone()));
        WorkspaceGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

/// Restores the previous ambient workspace on drop
///
/// Not `Send`: the restore must happen on the thread that entered.
pub struct WorkspaceGuard {
    previous: Option<WorkspaceHandle>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for WorkspaceGuard {
    fn drop(&mut self) {
        ACTIVE_WORKSPACE.with(|slot| *slot.borrow_mut() = self.previous.take());
    }
}

/// Identifies one deployment and the workspace its fixtures run inside
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    name: String,
    workspace: WorkspaceHandle,
}

impl DeploymentContext {
    pub fn new(name: impl Into<String>, workspace: WorkspaceHandle) -> Self {
        Self {
            name: name.into(),
            workspace,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn workspace(&self) -> &WorkspaceHandle {
        &self.workspace
    }
}
