use domain::TaskStatus;
use serde::Serialize;

/// Per-column task counts
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub blocked: usize,
}

impl BoardStats {
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
            TaskStatus::Blocked => self.blocked,
        }
    }

    /// Everything that is not completed
    pub fn open(&self) -> usize {
        self.total - self.completed
    }
}
