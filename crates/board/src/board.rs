use domain::{Task, TaskId, TaskStatus};
use tracing::{debug, warn};

use crate::drag::{DragEnd, DragOutcome};
use crate::stats::BoardStats;

/// Tasks grouped into one ordered bucket per status
///
/// Buckets are indexed by [`TaskStatus::index`], so every status has exactly
/// one bucket and a task can only ever sit in the bucket of its own status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBoard {
    buckets: [Vec<Task>; 4],
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from the flat task list, keeping list order inside buckets
    pub fn partition(tasks: &[Task]) -> Self {
        let mut board = Self::new();
        board.sync(tasks);
        board
    }

    /// Rebuild the buckets after the flat list changed
    pub fn sync(&mut self, tasks: &[Task]) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        for task in tasks {
            self.buckets[task.status.index()].push(task.clone());
        }
        debug!(tasks = tasks.len(), "Board re-partitioned");
    }

    pub fn bucket(&self, status: TaskStatus) -> &[Task] {
        &self.buckets[status.index()]
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Buckets in column order
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.bucket(status)))
    }

    /// All tasks, bucket by bucket
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.buckets.iter().flatten()
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.iter().find(|task| &task.id == id)
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            total: self.len(),
            todo: self.bucket(TaskStatus::Todo).len(),
            in_progress: self.bucket(TaskStatus::InProgress).len(),
            completed: self.bucket(TaskStatus::Completed).len(),
            blocked: self.bucket(TaskStatus::Blocked).len(),
        }
    }

    /// Reconcile a drag-end event into the buckets
    ///
    /// `on_status_change` is called exactly once for a cross-bucket move and
    /// never otherwise.
    pub fn apply_drag<F>(&mut self, event: &DragEnd, mut on_status_change: F) -> DragOutcome
    where
        F: FnMut(&TaskId, TaskStatus),
    {
        let Some(target) = event.destination else {
            debug!(task_id = %event.task_id, "Dropped outside the board");
            return DragOutcome::Unchanged;
        };

        let source = &mut self.buckets[event.source.index()];
        let Some(from) = source.iter().position(|task| task.id == event.task_id) else {
            warn!(
                task_id = %event.task_id,
                bucket = %event.source,
                "Dragged task not found in its source bucket"
            );
            return DragOutcome::Unchanged;
        };

        if !event.is_cross_bucket() {
            let to = target.index.min(source.len() - 1);
            if from == to {
                return DragOutcome::Unchanged;
            }
            let task = source.remove(from);
            source.insert(to, task);
            return DragOutcome::Reordered {
                bucket: event.source,
                from,
                to,
            };
        }

        let mut task = source.remove(from);
        task.status = target.bucket;
        self.buckets[target.bucket.index()].push(task);
        on_status_change(&event.task_id, target.bucket);

        debug!(
            task_id = %event.task_id,
            from = %event.source,
            to = %target.bucket,
            "Task moved between buckets"
        );

        DragOutcome::Moved {
            task_id: event.task_id.clone(),
            from: event.source,
            to: target.bucket,
        }
    }
}
