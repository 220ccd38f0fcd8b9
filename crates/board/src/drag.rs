use domain::{TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Where a dragged card was released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub bucket: TaskStatus,
    /// Position inside the destination bucket
    pub index: usize,
}

/// Drag-end event as reported by the UI toolkit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    pub task_id: TaskId,
    pub source: TaskStatus,
    /// `None` when the card was dropped outside every bucket
    pub destination: Option<DropTarget>,
}

impl DragEnd {
    pub fn new(task_id: impl Into<TaskId>, source: TaskStatus, destination: DropTarget) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination: Some(destination),
        }
    }

    /// Card released outside any bucket
    pub fn dropped_outside(task_id: impl Into<TaskId>, source: TaskStatus) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination: None,
        }
    }

    pub fn is_cross_bucket(&self) -> bool {
        self.destination
            .map(|target| target.bucket != self.source)
            .unwrap_or(false)
    }
}

/// What a reconciliation did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// State left untouched
    Unchanged,
    /// View-local reorder inside one bucket
    Reordered {
        bucket: TaskStatus,
        from: usize,
        to: usize,
    },
    /// Status change; the owner was notified
    Moved {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },
}

impl DragOutcome {
    pub fn is_status_change(&self) -> bool {
        matches!(self, DragOutcome::Moved { .. })
    }
}
