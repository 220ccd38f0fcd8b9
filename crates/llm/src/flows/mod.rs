//! Structured request/response adapters over a [`ModelBackend`]
//!
//! Every flow follows the same contract: validate the input, render the
//! prompt, await the model once, pull the JSON object out of the reply and
//! deserialize it into the flow's output type. Any failure fails the call;
//! there is no retry and no partial result.

use common::OperationTimer;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use validator::{Validate, ValidationErrors};

use crate::{CompletionRequest, ModelBackend};

pub mod chatbot;
pub mod review_request;
pub mod scheduling;
pub mod task_assignment;

pub use chatbot::{ChatbotFlow, ChatbotInput, ChatbotReply};
pub use review_request::{ReviewRequestFlow, ReviewRequestInput, ReviewRequestMessage};
pub use scheduling::{SchedulingFlow, SchedulingInput, SchedulingRecommendation};
pub use task_assignment::{
    AssignableTask, AvailableEmployee, TaskAssignment, TaskAssignmentFlow, TaskAssignmentInput,
    TaskAssignmentOutput,
};

const JSON_ONLY_SYSTEM_PROMPT: &str =
    "You are a backend service. Reply with a single JSON object and nothing else.";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Model call failed: {message}")]
    Model { message: String },

    #[error("Malformed model output: {reason}")]
    MalformedOutput { reason: String },
}

impl FlowError {
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::InvalidInput(_))
    }
}

pub type FlowResult<T> = Result<T, FlowError>;

/// One prompt template with typed input and output
pub trait Flow: Send + Sync {
    type Input: Validate + Serialize + Send + Sync;
    type Output: DeserializeOwned + Send;

    /// Name used in logs
    fn name(&self) -> &'static str;

    fn render_prompt(&self, input: &Self::Input) -> String;
}

/// Take the text between the first '{' and the last '}'
///
/// Models like to wrap JSON in prose or markdown fences.
pub fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start <= end).then(|| &reply[start..=end])
}

pub fn parse_output<T: DeserializeOwned>(reply: &str) -> FlowResult<T> {
    let json = extract_json(reply).ok_or_else(|| FlowError::MalformedOutput {
        reason: "no JSON object in model reply".to_string(),
    })?;
    serde_json::from_str(json).map_err(|e| FlowError::MalformedOutput {
        reason: e.to_string(),
    })
}

/// Run one flow against a backend
pub async fn run_flow<F: Flow>(
    flow: &F,
    backend: &dyn ModelBackend,
    input: &F::Input,
) -> FlowResult<F::Output> {
    let mut timer = OperationTimer::new(flow.name());
    timer.add_field("backend", backend.name());

    let result = execute(flow, backend, input).await;
    timer.finish_with_result(&result);
    result
}

async fn execute<F: Flow>(
    flow: &F,
    backend: &dyn ModelBackend,
    input: &F::Input,
) -> FlowResult<F::Output> {
    input.validate()?;

    let prompt = flow.render_prompt(input);
    debug!(flow = flow.name(), prompt_len = prompt.len(), "Prompt rendered");

    let request = CompletionRequest::new(&prompt).system_prompt(JSON_ONLY_SYSTEM_PROMPT);
    let reply = backend
        .complete(request)
        .await
        .map_err(|e| FlowError::Model {
            message: format!("{e:#}"),
        })?;

    parse_output(&reply).map_err(|e| {
        warn!(flow = flow.name(), error = %e, "Model reply did not match the output schema");
        e
    })
}

/// The four AI tools bound to one backend
#[derive(Clone)]
pub struct FlowRunner {
    backend: Arc<dyn ModelBackend>,
    chatbot: ChatbotFlow,
}

impl FlowRunner {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            chatbot: ChatbotFlow::default(),
        }
    }

    /// Persona name the chatbot introduces itself with
    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.chatbot = ChatbotFlow::new(company_name);
        self
    }

    #[instrument(skip_all)]
    pub async fn scheduling_recommendation(
        &self,
        input: &SchedulingInput,
    ) -> FlowResult<SchedulingRecommendation> {
        run_flow(&SchedulingFlow, self.backend.as_ref(), input).await
    }

    #[instrument(skip_all, fields(tasks = input.tasks.len(), employees = input.employees.len()))]
    pub async fn assign_tasks(&self, input: &TaskAssignmentInput) -> FlowResult<TaskAssignmentOutput> {
        run_flow(&TaskAssignmentFlow, self.backend.as_ref(), input).await
    }

    #[instrument(skip_all)]
    pub async fn chatbot_reply(&self, input: &ChatbotInput) -> FlowResult<ChatbotReply> {
        run_flow(&self.chatbot, self.backend.as_ref(), input).await
    }

    #[instrument(skip_all)]
    pub async fn review_request(&self, input: &ReviewRequestInput) -> FlowResult<ReviewRequestMessage> {
        run_flow(&ReviewRequestFlow, self.backend.as_ref(), input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_fenced_reply() {
        let reply = "Sure!\n```json\n{\"response\": \"Hi {there}\"}\n```";
        assert_eq!(extract_json(reply), Some("{\"response\": \"Hi {there}\"}"));
    }

    #[test]
    fn test_extract_json_without_object() {
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_parse_output_reports_schema_mismatch() {
        let err = parse_output::<ChatbotReply>(r#"{"answer": "hello"}"#).unwrap_err();
        assert!(matches!(err, FlowError::MalformedOutput { .. }));
    }
}
