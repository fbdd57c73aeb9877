//! Pure transformations over the task sequence.
//!
//! Every operation takes the current sequence and returns a new one;
//! nothing here touches storage. [`TaskStore`](super::TaskStore) layers
//! persistence on top.

use chrono::Utc;

use crate::models::Task;

/// Append a task with the given text.
///
/// Text that trims to empty is declined and the sequence comes back
/// unchanged. Accepted text is stored as typed, untrimmed.
pub fn add(tasks: &[Task], text: &str) -> Vec<Task> {
    if text.trim().is_empty() {
        return tasks.to_vec();
    }
    let mut next = tasks.to_vec();
    next.push(Task::new(next_id(tasks), text.to_string()));
    next
}

/// Flip `completed` on the matching task; unknown ids are a no-op.
pub fn toggle(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    completed: !task.completed,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Drop the matching task; unknown ids are a no-op. Survivor order is
/// preserved.
pub fn remove(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

/// Drop every completed task.
pub fn remove_completed(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|task| !task.completed).cloned().collect()
}

/// Millisecond-timestamp id, bumped past any value already present in
/// the sequence so rapid adds never collide.
fn next_id(tasks: &[Task]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !tasks.iter().any(|task| task.id == id) {
            return id;
        }
        candidate += 1;
    }
}
