//! AI tools page: form rows and input builders for the four flows
//!
//! The assignment form takes skills as comma-separated text, the way a
//! dispatcher types them; they are split and trimmed before dispatch.

use domain::{Appointment, Employee, Task};
use llm::{
    AssignableTask, AvailableEmployee, ReviewRequestInput, SchedulingInput, TaskAssignmentInput,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{FieldErrors, FormError};

/// Skill sent for a prefilled task nobody described
pub const GENERAL_SKILL: &str = "general";
const UNSPECIFIED: &str = "Unspecified";
const NO_DEADLINE: &str = "No deadline";

/// Split "cleaning, driving," into ["cleaning", "driving"]
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    #[validate(length(min = 1, message = "Task ID is required"))]
    pub task_id: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    /// Comma-separated
    #[validate(length(min = 1, message = "Skills are required (comma-separated)"))]
    pub required_skills: String,
    #[validate(length(min = 1, message = "Deadline is required"))]
    pub deadline: String,
}

impl TaskRow {
    /// Prefill from a board task; skills are not tracked on tasks
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id.to_string(),
            description: task
                .description
                .clone()
                .unwrap_or_else(|| task.title.clone()),
            location: task.location.clone().unwrap_or_default(),
            required_skills: String::new(),
            deadline: task
                .deadline
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }

    fn to_assignable(&self) -> AssignableTask {
        AssignableTask {
            task_id: self.task_id.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            required_skills: split_skills(&self.required_skills),
            deadline: self.deadline.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRow {
    #[validate(length(min = 1, message = "Employee ID is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Skills are required (comma-separated)"))]
    pub skills: String,
    #[validate(range(min = 0, message = "Workload must be non-negative"))]
    pub current_workload: i64,
}

impl EmployeeRow {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id.to_string(),
            name: employee.name.clone(),
            location: employee.location.clone().unwrap_or_default(),
            skills: employee
                .skills
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            current_workload: i64::from(employee.current_workload),
        }
    }

    fn to_available(&self) -> Result<AvailableEmployee, FormError> {
        let current_workload = u32::try_from(self.current_workload)
            .map_err(|_| FormError::field("current_workload", "Workload is too large"))?;
        Ok(AvailableEmployee {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            skills: split_skills(&self.skills),
            current_workload,
        })
    }
}

/// Task assignment form: one or more task rows and employee rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentForm {
    pub tasks: Vec<TaskRow>,
    pub employees: Vec<EmployeeRow>,
}

impl AssignmentForm {
    pub fn new(tasks: Vec<TaskRow>, employees: Vec<EmployeeRow>) -> Self {
        Self { tasks, employees }
    }

    /// Rows for every open task and every employee
    pub fn prefilled(tasks: &[Task], employees: &[Employee]) -> Self {
        Self {
            tasks: tasks
                .iter()
                .filter(|t| t.status.is_open())
                .map(TaskRow::from_task)
                .collect(),
            employees: employees.iter().map(EmployeeRow::from_employee).collect(),
        }
    }

    /// Fill the blanks a prefill leaves behind (tasks carry no skills, and
    /// location or deadline may be unset) so the form passes validation
    pub fn fill_blanks(&mut self) {
        fn or_default(value: &mut String, default: &str) {
            if value.trim().is_empty() {
                *value = default.to_string();
            }
        }
        for row in &mut self.tasks {
            or_default(&mut row.required_skills, GENERAL_SKILL);
            or_default(&mut row.location, UNSPECIFIED);
            or_default(&mut row.deadline, NO_DEADLINE);
        }
        for row in &mut self.employees {
            or_default(&mut row.location, UNSPECIFIED);
            or_default(&mut row.skills, GENERAL_SKILL);
        }
    }

    pub fn validate_rows(&self) -> FieldErrors {
        let mut fields = FieldErrors::new();
        if self.tasks.is_empty() {
            fields.add("tasks", "At least one task is required.");
        }
        if self.employees.is_empty() {
            fields.add("employees", "At least one employee is required.");
        }
        for (index, row) in self.tasks.iter().enumerate() {
            if let Err(errors) = row.validate() {
                fields.extend_prefixed(&format!("tasks[{index}]"), &errors);
            }
        }
        for (index, row) in self.employees.iter().enumerate() {
            if let Err(errors) = row.validate() {
                fields.extend_prefixed(&format!("employees[{index}]"), &errors);
            }
        }
        fields
    }

    /// Validated flow input with skills split into lists
    pub fn into_input(&self) -> Result<TaskAssignmentInput, FormError> {
        self.validate_rows().into_result()?;

        let employees = self
            .employees
            .iter()
            .map(EmployeeRow::to_available)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TaskAssignmentInput {
            tasks: self.tasks.iter().map(TaskRow::to_assignable).collect(),
            employees,
        })
    }
}

/// Scheduling request for one employee; blank fields fail flow validation
pub fn scheduling_input(
    employee: &Employee,
    location: impl Into<String>,
    service_type: impl Into<String>,
) -> SchedulingInput {
    SchedulingInput {
        employee_availability: employee.availability.clone().unwrap_or_default(),
        location: location.into(),
        service_type: service_type.into(),
        workload: format!("{} active tasks", employee.current_workload),
        skills: employee
            .skills
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Review request for a completed visit
pub fn review_input(appointment: &Appointment, review_page_link: impl Into<String>) -> ReviewRequestInput {
    ReviewRequestInput {
        client_name: appointment.client_name.clone().unwrap_or_default(),
        service_name: appointment.service_name.clone().unwrap_or_default(),
        google_reviews_page_link: review_page_link.into(),
    }
}
