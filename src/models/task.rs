use serde::{Deserialize, Serialize};

/// A single to-do entry.
///
/// The text is fixed at creation; only `completed` changes over a task's
/// lifetime. Tasks carry an opaque string id unique within the list, and
/// the persisted encoding keeps exactly these three fields so stored lists
/// round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// A fresh, not-yet-completed task.
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}
