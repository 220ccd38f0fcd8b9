use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Flow;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatbotInput {
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}

impl ChatbotInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatbotReply {
    pub response: String,
}

/// Customer service persona
#[derive(Debug, Clone)]
pub struct ChatbotFlow {
    company_name: String,
}

impl ChatbotFlow {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
        }
    }
}

impl Default for ChatbotFlow {
    fn default() -> Self {
        Self::new("PoliMinder")
    }
}

impl Flow for ChatbotFlow {
    type Input = ChatbotInput;
    type Output = ChatbotReply;

    fn name(&self) -> &'static str {
        "customer_service_chatbot"
    }

    fn render_prompt(&self, input: &ChatbotInput) -> String {
        format!(
            r#"You are a customer service chatbot for {company}. Your goal is to answer frequently asked questions, schedule appointments, and provide basic support.

Here are some guidelines:
- Be friendly and helpful.
- If you cannot answer a question, offer to connect the user with a human representative.
- When scheduling appointments, ask for the user's preferred date and time, and confirm the appointment details.

User message: {message}

Answer ONLY in JSON format:
{{"response": "your reply to the user"}}"#,
            company = self.company_name,
            message = input.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_name_is_configurable() {
        let prompt = ChatbotFlow::new("Sparkle Co").render_prompt(&ChatbotInput::new("Hi"));
        assert!(prompt.starts_with("You are a customer service chatbot for Sparkle Co."));
        assert!(prompt.contains("User message: Hi"));
    }
}
