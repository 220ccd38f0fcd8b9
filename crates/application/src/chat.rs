//! Support chat transcript
//!
//! Append-only while a call succeeds. A failed call truncates the
//! transcript back to its length before the user message was appended.

use domain::{ChatMessage, ChatRole};
use llm::{ChatbotInput, FlowResult, FlowRunner};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ChatSession {
    company_name: String,
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new("PoliMinder")
    }
}

impl ChatSession {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            messages: Vec::new(),
        }
    }

    pub fn welcome_text(&self) -> String {
        format!(
            "Welcome to {} support! How can I help you today?",
            self.company_name
        )
    }

    /// Opening an empty session greets the user once
    pub fn open(&mut self) {
        if self.messages.is_empty() {
            self.messages.push(ChatMessage::system(self.welcome_text()));
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Send one user message and append the assistant reply
    pub async fn send(&mut self, runner: &FlowRunner, text: &str) -> FlowResult<&ChatMessage> {
        let checkpoint = self.messages.len();
        self.messages.push(ChatMessage::user(text));

        match runner.chatbot_reply(&ChatbotInput::new(text)).await {
            Ok(reply) => {
                info!(messages = self.messages.len() + 1, "💬 Chatbot replied");
                self.messages.push(ChatMessage::assistant(reply.response));
                Ok(&self.messages[self.messages.len() - 1])
            }
            Err(e) => {
                warn!(error = %e, "Chatbot call failed, rolling back transcript");
                self.messages.truncate(checkpoint);
                Err(e)
            }
        }
    }

    pub fn last_role(&self) -> Option<ChatRole> {
        self.messages.last().map(|m| m.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_greets_once() {
        let mut chat = ChatSession::new("Sparkle Co");
        chat.open();
        chat.open();

        assert_eq!(chat.len(), 1);
        assert_eq!(chat.last_role(), Some(ChatRole::SystemMessage));
        assert_eq!(
            chat.messages()[0].content,
            "Welcome to Sparkle Co support! How can I help you today?"
        );
    }
}
