//! Access to the project the terminal pane is attached to.

use std::sync::{Arc, RwLock};

/// Identity of an open project as far as the terminal cares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
    /// Project root on the backend, used to seed the session's cwd.
    pub directory: Option<String>,
}

/// Supplies the currently open project, if any.
pub trait ProjectContext: Send + Sync {
    fn current_project(&self) -> Option<ProjectRef>;
}

/// Project holder shared between the host and its terminal sessions.
///
/// Clones observe the same slot, so the host can switch projects without
/// reaching into the session.
#[derive(Debug, Clone, Default)]
pub struct SharedProject {
    slot: Arc<RwLock<Option<ProjectRef>>>,
}

impl SharedProject {
    pub fn new(project: Option<ProjectRef>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(project)),
        }
    }

    /// Replace the open project (`None` closes it).
    pub fn set(&self, project: Option<ProjectRef>) {
        match self.slot.write() {
            Ok(mut guard) => *guard = project,
            Err(poisoned) => *poisoned.into_inner() = project,
        }
    }
}

impl ProjectContext for SharedProject {
    fn current_project(&self) -> Option<ProjectRef> {
        match self.slot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
