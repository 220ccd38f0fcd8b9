use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use domain::config::{LlmConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

pub mod flows;

pub use flows::*;

#[derive(Debug, Clone)]
pub enum LlmProvider {
    OpenAI {
        api_key: String,
        model: String,
    },
    Anthropic {
        api_key: String,
        model: String,
    },
    /// Any OpenAI-compatible server
    Local {
        url: String,
        model: String,
    },
    Azure {
        endpoint: String,
        api_key: String,
        model: String,
    },
    Groq {
        api_key: String,
        model: String,
    },
}

impl LlmProvider {
    pub fn kind(&self) -> ProviderKind {
        match self {
            LlmProvider::OpenAI { .. } => ProviderKind::OpenAI,
            LlmProvider::Anthropic { .. } => ProviderKind::Anthropic,
            LlmProvider::Local { .. } => ProviderKind::Local,
            LlmProvider::Azure { .. } => ProviderKind::Azure,
            LlmProvider::Groq { .. } => ProviderKind::Groq,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            LlmProvider::OpenAI { model, .. }
            | LlmProvider::Anthropic { model, .. }
            | LlmProvider::Local { model, .. }
            | LlmProvider::Azure { model, .. }
            | LlmProvider::Groq { model, .. } => model,
        }
    }

    /// Get provider name for display
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.kind(), self.model())
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
}

impl CompletionRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            max_tokens: None,
            temperature: None,
            system_prompt: None,
        }
    }

    pub fn system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = Some(prompt.to_string());
        self
    }
}

/// Anything that turns a prompt into model text
///
/// The flows only ever talk to this trait; tests plug in scripted backends.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Short label for logs
    fn name(&self) -> String {
        "model".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    client: reqwest::Client,
    max_tokens: u32,
    temperature: f32,
    /// Overrides the hosted endpoint (proxies, test servers)
    base_url: Option<String>,
}

// OpenAI-compatible wire types (OpenAI, Azure, Groq, local servers)
#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIChatChoice {
    message: OpenAIMessage,
}

// Anthropic API types
#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicContent {
    text: String,
}

/// Resolved per-call settings
struct CallSettings<'a> {
    system: Option<&'a str>,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

impl LlmClient {
    pub fn new(provider: LlmProvider, max_tokens: u32, temperature: f32) -> Self {
        Self {
            provider,
            client: reqwest::Client::new(),
            max_tokens,
            temperature,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Build a client from the `[llm]` section of the application config
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let model = config.model_name().to_string();
        let require_key = || {
            config.api_key.clone().ok_or_else(|| {
                anyhow!(
                    "API key for provider '{}' is not configured",
                    config.provider
                )
            })
        };

        let provider = match config.provider {
            ProviderKind::OpenAI => LlmProvider::OpenAI {
                api_key: require_key()?,
                model,
            },
            ProviderKind::Anthropic => LlmProvider::Anthropic {
                api_key: require_key()?,
                model,
            },
            ProviderKind::Groq => LlmProvider::Groq {
                api_key: require_key()?,
                model,
            },
            ProviderKind::Azure => LlmProvider::Azure {
                endpoint: config
                    .base_url
                    .clone()
                    .context("Azure provider needs llm.base_url (resource endpoint)")?,
                api_key: require_key()?,
                model,
            },
            ProviderKind::Local => LlmProvider::Local {
                url: config
                    .base_url
                    .clone()
                    .unwrap_or_else(|| "http://localhost:1234/v1".to_string()),
                model,
            },
        };

        let mut client = Self::new(provider, config.max_tokens, config.temperature);
        if matches!(
            config.provider,
            ProviderKind::OpenAI | ProviderKind::Anthropic | ProviderKind::Groq
        ) {
            client.base_url = config.base_url.clone();
        }
        Ok(client)
    }

    async fn dispatch(&self, call: CallSettings<'_>) -> Result<String> {
        match &self.provider {
            LlmProvider::OpenAI { api_key, model } => {
                let base = self.base_url.as_deref().unwrap_or("https://api.openai.com/v1");
                self.openai_compatible_chat("OpenAI", base, Some(api_key), model, &call)
                    .await
            }
            LlmProvider::Groq { api_key, model } => {
                let base = self
                    .base_url
                    .as_deref()
                    .unwrap_or("https://api.groq.com/openai/v1");
                self.openai_compatible_chat("Groq", base, Some(api_key), model, &call)
                    .await
            }
            LlmProvider::Local { url, model } => {
                self.openai_compatible_chat("local", url, None, model, &call)
                    .await
            }
            LlmProvider::Anthropic { api_key, model } => {
                self.anthropic_chat(api_key, model, &call).await
            }
            LlmProvider::Azure {
                endpoint,
                api_key,
                model,
            } => self.azure_chat(endpoint, api_key, model, &call).await,
        }
    }

    fn openai_messages(call: &CallSettings<'_>) -> Vec<OpenAIMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = call.system {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: call.prompt.to_string(),
        });
        messages
    }

    async fn openai_compatible_chat(
        &self,
        label: &str,
        base_url: &str,
        api_key: Option<&str>,
        model: &str,
        call: &CallSettings<'_>,
    ) -> Result<String> {
        let request = OpenAIChatRequest {
            model: model.to_string(),
            messages: Self::openai_messages(call),
            max_tokens: Some(call.max_tokens),
            temperature: Some(call.temperature),
        };

        // base URLs may come with a trailing "/"
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        info!("🚀 Sending request to {}: {}", label, model);
        debug!("Prompt: {}", call.prompt);

        let mut builder = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{label} request to {endpoint} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("{} API error {}: {}", label, status, error_text);
            return Err(anyhow!("{label} API error {status}: {error_text}"));
        }

        let chat_response: OpenAIChatResponse = response.json().await?;

        match chat_response.choices.into_iter().next() {
            Some(choice) => {
                info!("✅ Got response from {}", label);
                Ok(choice.message.content)
            }
            None => Err(anyhow!("Empty response from {label}")),
        }
    }

    async fn anthropic_chat(
        &self,
        api_key: &str,
        model: &str,
        call: &CallSettings<'_>,
    ) -> Result<String> {
        let request = AnthropicRequest {
            model: model.to_string(),
            max_tokens: call.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: call.prompt.to_string(),
            }],
            system: call.system.map(str::to_string),
            temperature: Some(call.temperature),
        };

        let base = self
            .base_url
            .as_deref()
            .unwrap_or("https://api.anthropic.com/v1")
            .trim_end_matches('/');

        info!("🚀 Sending request to Anthropic: {}", model);
        debug!("Prompt: {}", call.prompt);

        let response = self
            .client
            .post(format!("{base}/messages"))
            .header("x-api-key", api_key)
            .header("Content-Type", "application/json")
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .context("Anthropic request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Anthropic API error {}: {}", status, error_text);
            return Err(anyhow!("Anthropic API error {status}: {error_text}"));
        }

        let chat_response: AnthropicResponse = response.json().await?;

        match chat_response.content.into_iter().next() {
            Some(content) => {
                info!("✅ Got response from Anthropic");
                Ok(content.text)
            }
            None => Err(anyhow!("Empty response from Anthropic")),
        }
    }

    async fn azure_chat(
        &self,
        endpoint: &str,
        api_key: &str,
        model: &str,
        call: &CallSettings<'_>,
    ) -> Result<String> {
        let request = OpenAIChatRequest {
            model: model.to_string(),
            messages: Self::openai_messages(call),
            max_tokens: Some(call.max_tokens),
            temperature: Some(call.temperature),
        };

        info!("🚀 Sending request to Azure OpenAI: {} -> {}", endpoint, model);

        let response = self
            .client
            .post(format!(
                "{}/openai/deployments/{}/chat/completions?api-version=2023-12-01-preview",
                endpoint.trim_end_matches('/'),
                model
            ))
            .header("api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Azure OpenAI request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Azure OpenAI error {}: {}", status, error_text);
            return Err(anyhow!("Azure OpenAI error {status}: {error_text}"));
        }

        let chat_response: OpenAIChatResponse = response.json().await?;

        match chat_response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(anyhow!("Empty response from Azure OpenAI")),
        }
    }
}

#[async_trait]
impl ModelBackend for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let call = CallSettings {
            system: request.system_prompt.as_deref(),
            prompt: &request.prompt,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            temperature: request.temperature.unwrap_or(self.temperature),
        };
        self.dispatch(call).await
    }

    fn name(&self) -> String {
        self.provider.display_name()
    }
}
