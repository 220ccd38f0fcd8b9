use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Flow;

/// What the dispatcher knows about the job and the candidate employee
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    #[validate(length(min = 1, message = "Employee availability is required"))]
    pub employee_availability: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Service type is required"))]
    pub service_type: String,
    #[validate(length(min = 1, message = "Workload is required"))]
    pub workload: String,
    #[validate(length(min = 1, message = "Skills are required"))]
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingRecommendation {
    pub recommendation: String,
    pub reason: String,
}

pub struct SchedulingFlow;

impl Flow for SchedulingFlow {
    type Input = SchedulingInput;
    type Output = SchedulingRecommendation;

    fn name(&self) -> &'static str {
        "scheduling_recommendation"
    }

    fn render_prompt(&self, input: &SchedulingInput) -> String {
        format!(
            r#"You are an expert scheduling assistant. Based on the employee's availability, location, service type, workload, and skills, provide a scheduling recommendation and a reason for the recommendation.

Employee Availability: {availability}
Location: {location}
Service Type: {service_type}
Workload: {workload}
Skills: {skills}

Answer ONLY in JSON format:
{{
    "recommendation": "the scheduling recommendation",
    "reason": "why this slot and employee fit"
}}"#,
            availability = input.employee_availability,
            location = input.location,
            service_type = input.service_type,
            workload = input.workload,
            skills = input.skills,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SchedulingInput {
        SchedulingInput {
            employee_availability: "Mon-Fri, 9am-5pm".to_string(),
            location: "Downtown".to_string(),
            service_type: "Window Washing".to_string(),
            workload: "2 appointments today".to_string(),
            skills: "window_washing, driving".to_string(),
        }
    }

    #[test]
    fn test_prompt_carries_every_field() {
        let prompt = SchedulingFlow.render_prompt(&input());
        assert!(prompt.contains("Employee Availability: Mon-Fri, 9am-5pm"));
        assert!(prompt.contains("Service Type: Window Washing"));
        assert!(prompt.contains("\"recommendation\""));
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let mut input = input();
        input.location.clear();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("location"));
    }
}
