//! Transient toast notifications raised by workspace actions

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

use crate::errors::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// "Task Created" / "Task Updated"
    pub fn saved(kind: EntityKind, created: bool) -> Self {
        let verb = if created { "Created" } else { "Updated" };
        Self::success(
            format!("{} {verb}", kind.label()),
            format!("The {kind} has been saved successfully."),
        )
    }

    pub fn save_failed(kind: EntityKind) -> Self {
        Self::error("Error", format!("Failed to save {kind}. Please try again."))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// FIFO of notices not yet shown
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, error = notice.is_error(), "Notice raised");
        self.pending.push_back(notice);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.pending.back()
    }

    /// Hand every pending notice to the caller
    pub fn drain(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_texts() {
        let created = Notice::saved(EntityKind::Appointment, true);
        assert_eq!(created.title, "Appointment Created");
        assert_eq!(
            created.description,
            "The appointment has been saved successfully."
        );

        let failed = Notice::save_failed(EntityKind::Service);
        assert!(failed.is_error());
        assert_eq!(failed.description, "Failed to save service. Please try again.");
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = NoticeQueue::default();
        queue.push(Notice::success("a", "1"));
        queue.push(Notice::error("b", "2"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "a");
        assert!(queue.is_empty());
    }
}
