use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration profile for different environments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Development profile with human readable logs
    #[default]
    Dev,
    /// Production profile with JSON logs
    Prod,
    /// Custom profile with user-defined name
    Custom(String),
}

impl Profile {
    /// Get the profile name as a string
    pub fn name(&self) -> &str {
        match self {
            Profile::Dev => "dev",
            Profile::Prod => "prod",
            Profile::Custom(name) => name,
        }
    }
}

impl FromStr for Profile {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "dev" | "development" => Profile::Dev,
            "prod" | "production" => Profile::Prod,
            custom => Profile::Custom(custom.to_string()),
        })
    }
}

/// Hosted or local model backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Anthropic,
    Azure,
    Groq,
    /// Any OpenAI-compatible server (LM Studio, Ollama, llama.cpp)
    Local,
}

impl ProviderKind {
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Azure => "azure",
            ProviderKind::Groq => "groq",
            ProviderKind::Local => "local",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-haiku-20240307",
            ProviderKind::Azure => "gpt-4o-mini",
            ProviderKind::Groq => "llama-3.1-8b-instant",
            ProviderKind::Local => "llama-3.2-3b-instruct",
        }
    }

    /// Hosted providers cannot be called without a key
    pub fn requires_api_key(self) -> bool {
        !matches!(self, ProviderKind::Local)
    }

    /// Name of the conventional environment variable holding the key
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAI => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Azure => Some("AZURE_OPENAI_API_KEY"),
            ProviderKind::Groq => Some("GROQ_API_KEY"),
            ProviderKind::Local => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "azure" => Ok(ProviderKind::Azure),
            "groq" => Ok(ProviderKind::Groq),
            "local" | "ollama" | "lmstudio" => Ok(ProviderKind::Local),
            other => Err(format!("Unsupported LLM provider: {other}")),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub business: BusinessConfig,
}

impl AppConfig {
    /// Apply built-in profile defaults that the file did not set explicitly
    pub fn apply_profile(&mut self) {
        if self.profile == Profile::Prod {
            self.logging.json = true;
            self.logging.include_line_numbers = false;
        }
    }
}

/// External model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Endpoint for `local` and `azure` providers
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl LlmConfig {
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            api_key: None,
            base_url: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit one JSON object per line
    #[serde(default)]
    pub json: bool,

    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default)]
    pub include_line_numbers: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            color: true,
            include_line_numbers: false,
        }
    }
}

/// Business facing settings used by the AI tools and dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// Persona name used by the customer chatbot
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Default Google Reviews link for review requests
    #[serde(default)]
    pub review_page_link: Option<String>,

    /// How many upcoming appointments the dashboard lists
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            review_page_link: None,
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_company_name() -> String {
    "PoliMinder".to_string()
}

fn default_upcoming_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_str() {
        assert_eq!("production".parse::<Profile>().unwrap(), Profile::Prod);
        assert_eq!(
            "staging".parse::<Profile>().unwrap(),
            Profile::Custom("staging".to_string())
        );
    }

    #[test]
    fn test_provider_aliases() {
        assert_eq!("Ollama".parse::<ProviderKind>().unwrap(), ProviderKind::Local);
        assert!("google".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_prod_profile_switches_to_json_logs() {
        let mut config = AppConfig {
            profile: Profile::Prod,
            ..AppConfig::default()
        };
        config.apply_profile();
        assert!(config.logging.json);
    }

    #[test]
    fn test_model_name_falls_back_to_provider_default() {
        let config = LlmConfig {
            provider: ProviderKind::Groq,
            ..LlmConfig::default()
        };
        assert_eq!(config.model_name(), "llama-3.1-8b-instant");
    }
}
