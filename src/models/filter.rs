use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Which subset of the task list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Incomplete,
    Completed,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Incomplete => "incomplete",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "incomplete" => Some(Self::Incomplete),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Next mode in display order, wrapping.
    pub fn cycle(self) -> Self {
        match self {
            Self::All => Self::Incomplete,
            Self::Incomplete => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

/// Project the tasks visible under `filter`, order preserved.
///
/// Produces a fresh list on every call; callers must not rely on identity
/// across calls.
pub fn visible(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            Filter::All => true,
            Filter::Incomplete => !task.completed,
            Filter::Completed => task.completed,
        })
        .cloned()
        .collect()
}
