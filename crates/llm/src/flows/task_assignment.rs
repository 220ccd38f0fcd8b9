use serde::{Deserialize, Serialize};
use std::fmt::Write;
use validator::Validate;

use super::Flow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableTask {
    pub task_id: String,
    pub description: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableEmployee {
    pub employee_id: String,
    pub name: String,
    pub location: String,
    pub skills: Vec<String>,
    pub current_workload: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskAssignmentInput {
    #[validate(length(min = 1, message = "At least one task is required"))]
    pub tasks: Vec<AssignableTask>,
    #[validate(length(min = 1, message = "At least one employee is required"))]
    pub employees: Vec<AvailableEmployee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    pub task_id: String,
    pub employee_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignmentOutput {
    pub assignments: Vec<TaskAssignment>,
    pub unassigned_tasks: Vec<String>,
}

pub struct TaskAssignmentFlow;

impl Flow for TaskAssignmentFlow {
    type Input = TaskAssignmentInput;
    type Output = TaskAssignmentOutput;

    fn name(&self) -> &'static str {
        "task_assignment"
    }

    fn render_prompt(&self, input: &TaskAssignmentInput) -> String {
        let mut tasks = String::new();
        for task in &input.tasks {
            let _ = write!(
                tasks,
                "  - Task ID: {}\n    Description: {}\n    Location: {}\n    Required Skills: {}\n    Deadline: {}\n",
                task.task_id,
                task.description,
                task.location,
                task.required_skills.join(", "),
                task.deadline
            );
        }

        let mut employees = String::new();
        for employee in &input.employees {
            let _ = write!(
                employees,
                "  - Employee ID: {}\n    Name: {}\n    Location: {}\n    Skills: {}\n    Current Workload: {}\n",
                employee.employee_id,
                employee.name,
                employee.location,
                employee.skills.join(", "),
                employee.current_workload
            );
        }

        format!(
            r#"You are an AI assistant responsible for assigning tasks to employees based on their skills, location, and workload. Your goal is to distribute the work effectively and improve employee utilization.

Tasks:
{tasks}
Employees:
{employees}
Based on the tasks and employees provided, generate a list of task assignments, considering skills, location, and workload. Provide a reason for each assignment. If a task cannot be assigned, include it in the unassignedTasks array.

Output the assignments ONLY in JSON format:
{{
    "assignments": [{{"taskId": "...", "employeeId": "...", "reason": "..."}}],
    "unassignedTasks": ["..."]
}}"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_tasks_and_employees() {
        let input = TaskAssignmentInput {
            tasks: vec![AssignableTask {
                task_id: "t1".to_string(),
                description: "Clean windows".to_string(),
                location: "Downtown".to_string(),
                required_skills: vec!["window_washing".to_string(), "ladder".to_string()],
                deadline: "2024-12-31".to_string(),
            }],
            employees: vec![AvailableEmployee {
                employee_id: "e1".to_string(),
                name: "Alice Smith".to_string(),
                location: "Downtown".to_string(),
                skills: vec!["window_washing".to_string()],
                current_workload: 2,
            }],
        };

        let prompt = TaskAssignmentFlow.render_prompt(&input);
        assert!(prompt.contains("Required Skills: window_washing, ladder"));
        assert!(prompt.contains("Name: Alice Smith"));
        assert!(prompt.contains("Current Workload: 2"));
    }

    #[test]
    fn test_empty_lists_are_rejected() {
        let input = TaskAssignmentInput {
            tasks: vec![],
            employees: vec![],
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("tasks"));
        assert!(fields.contains_key("employees"));
    }
}
