use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Flow;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequestInput {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    #[validate(length(min = 1, message = "Service name is required"))]
    pub service_name: String,
    #[validate(url(message = "Must be a valid URL for Google Reviews page"))]
    pub google_reviews_page_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequestMessage {
    pub message: String,
}

pub struct ReviewRequestFlow;

impl Flow for ReviewRequestFlow {
    type Input = ReviewRequestInput;
    type Output = ReviewRequestMessage;

    fn name(&self) -> &'static str {
        "review_request"
    }

    fn render_prompt(&self, input: &ReviewRequestInput) -> String {
        format!(
            r#"You are a helpful assistant that crafts thank you messages and requests for customer reviews.

Given the following information, create a personalized thank you message to the client and invite them to leave a review on our Google Reviews page.

Client Name: {}
Service Provided: {}
Google Reviews Page Link: {}

Answer ONLY in JSON format:
{{"message": "the thank you message including the link"}}"#,
            input.client_name, input.service_name, input.google_reviews_page_link
        )
    }
}
