use anyhow::{Context, Result};
use domain::config::*;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info, warn};

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    /// Fall back to OPENAI_API_KEY & co. when no key is configured
    provider_key_fallback: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "POLIMINDER_".to_string(),
            provider_key_fallback: true,
        }
    }

    /// Search only the given paths
    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn without_provider_key_fallback(mut self) -> Self {
        self.provider_key_fallback = false;
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("poliminder.toml"),
            PathBuf::from("poliminder.json"),
            PathBuf::from(".poliminderrc"),
            PathBuf::from(".poliminderrc.toml"),
            PathBuf::from(".poliminderrc.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".poliminderrc"));
            paths.push(home_dir.join(".poliminderrc.toml"));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("poliminder").join("config.toml"));
            paths.push(config_dir.join("poliminder").join("config.json"));
        }

        paths
    }

    pub async fn load(&self) -> Result<AppConfig> {
        let (config, _) = self.load_with_source().await?;
        Ok(config)
    }

    pub async fn load_with_source(&self) -> Result<(AppConfig, ConfigSource)> {
        dotenv::dotenv().ok();

        let (mut config, source) = self.load_base_config().await?;

        if let Some(profile) = self.detect_profile() {
            debug!("Profile overridden from environment: {}", profile.name());
            config.profile = profile;
        }

        self.apply_env_overrides(&mut config)?;
        config.apply_profile();

        debug!(
            profile = config.profile.name(),
            provider = %config.llm.provider,
            "Configuration resolved"
        );
        Ok((config, source))
    }

    /// Profile from `<PREFIX>ENV`, if set
    pub fn detect_profile(&self) -> Option<Profile> {
        env::var(format!("{}ENV", self.env_prefix))
            .ok()
            .map(|env_val| Profile::from_str(&env_val).unwrap_or_default())
    }

    async fn load_base_config(&self) -> Result<(AppConfig, ConfigSource)> {
        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            match self.load_file(path).await {
                Ok(file_config) => {
                    info!("Loaded configuration from: {}", path.display());
                    return Ok((file_config, ConfigSource::File(path.clone())));
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }

        debug!("No config file found, using defaults");
        Ok((AppConfig::default(), ConfigSource::Default))
    }

    pub async fn load_file(&self, path: &Path) -> Result<AppConfig> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => {
                // Try TOML first, then JSON
                toml::from_str(&content)
                    .or_else(|_| serde_json::from_str(&content))
                    .context("Failed to parse config file")
            }
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.env_prefix, name))
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    fn apply_env_overrides(&self, config: &mut AppConfig) -> Result<()> {
        // LLM settings
        if let Some(provider) = self.var("LLM_PROVIDER") {
            config.llm.provider = provider
                .parse::<ProviderKind>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {}LLM_PROVIDER", self.env_prefix))?;
        }

        if let Some(model) = self.var("LLM_MODEL") {
            config.llm.model = Some(model);
        }

        if let Some(base_url) = self.var("LLM_BASE_URL") {
            config.llm.base_url = Some(base_url);
        }

        if let Some(max_tokens) = self.var("LLM_MAX_TOKENS") {
            config.llm.max_tokens = max_tokens
                .parse::<u32>()
                .with_context(|| format!("Invalid {}LLM_MAX_TOKENS", self.env_prefix))?;
        }

        if let Some(temperature) = self.var("LLM_TEMPERATURE") {
            config.llm.temperature = temperature
                .parse::<f32>()
                .with_context(|| format!("Invalid {}LLM_TEMPERATURE", self.env_prefix))?;
        }

        if let Some(api_key) = self.var("LLM_API_KEY") {
            config.llm.api_key = Some(api_key);
        } else if config.llm.api_key.is_none() && self.provider_key_fallback {
            config.llm.api_key = config
                .llm
                .provider
                .api_key_env()
                .and_then(|name| env::var(name).ok());
        }

        // Logging settings
        if let Some(log_level) = self.var("LOG_LEVEL") {
            config.logging.level = log_level;
        }

        if let Some(json) = self.var("LOG_JSON") {
            config.logging.json = parse_flag(&json);
        }

        // Business settings
        if let Some(name) = self.var("COMPANY_NAME") {
            config.business.company_name = name;
        }

        if let Some(link) = self.var("REVIEW_PAGE_LINK") {
            config.business.review_page_link = Some(link);
        }

        Ok(())
    }

    pub fn generate_example_config() -> String {
        let config = AppConfig {
            llm: LlmConfig {
                provider: ProviderKind::OpenAI,
                model: Some(ProviderKind::OpenAI.default_model().to_string()),
                ..LlmConfig::default()
            },
            business: BusinessConfig {
                review_page_link: Some("https://g.page/r/your-business/review".to_string()),
                ..BusinessConfig::default()
            },
            ..AppConfig::default()
        };

        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_example_config_round_trips() {
        let example = ConfigLoader::generate_example_config();
        let parsed: AppConfig = toml::from_str(&example).unwrap();
        assert_eq!(parsed.llm.provider, ProviderKind::OpenAI);
        assert!(parsed.business.review_page_link.is_some());
    }
}
