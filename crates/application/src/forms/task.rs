use chrono::{DateTime, Utc};
use domain::{ClientId, EmployeeId, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{invalid, non_blank};
use crate::errors::FormError;

fn task_status(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<TaskStatus>().is_ok() {
        Ok(())
    } else {
        Err(invalid(
            "status",
            "Status must be one of todo, in-progress, completed, blocked",
        ))
    }
}

/// Raw task dialog input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    /// Blank or missing means "todo"
    #[validate(custom = "task_status")]
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub client_id: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub assigned_to: Option<EmployeeId>,
    pub client_id: Option<ClientId>,
    pub location: Option<String>,
}

impl TaskForm {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            deadline: task.deadline,
            status: Some(task.status.to_string()),
            assigned_to: task.assigned_to.as_ref().map(ToString::to_string),
            client_id: task.client_id.as_ref().map(ToString::to_string),
            location: task.location.clone(),
        }
    }

    pub fn validated(&self) -> Result<TaskDraft, FormError> {
        self.validate()?;

        Ok(TaskDraft {
            title: self.title.clone(),
            description: non_blank(&self.description),
            deadline: self.deadline,
            status: non_blank(&self.status)
                .and_then(|s| s.parse::<TaskStatus>().ok())
                .unwrap_or_default(),
            assigned_to: non_blank(&self.assigned_to).map(EmployeeId::from),
            client_id: non_blank(&self.client_id).map(ClientId::from),
            location: non_blank(&self.location),
        })
    }
}

impl TaskDraft {
    pub fn into_task(self, id: TaskId) -> Task {
        let mut task = Task::new(id, String::new(), self.status);
        self.apply(&mut task);
        task
    }

    /// Overwrite the editable fields; id and linked appointment are kept
    pub fn apply(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.deadline = self.deadline;
        task.status = self.status;
        task.assigned_to = self.assigned_to;
        task.client_id = self.client_id;
        task.location = self.location;
    }
}
