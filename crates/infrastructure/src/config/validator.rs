use anyhow::{bail, Result};
use domain::config::*;
use tracing::warn;

#[derive(Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &AppConfig) -> Result<()> {
        self.validate_llm_config(&config.llm)?;
        self.validate_logging_config(&config.logging)?;
        self.validate_business_config(&config.business)?;
        Ok(())
    }

    fn validate_llm_config(&self, config: &LlmConfig) -> Result<()> {
        // Validate temperature
        if !(0.0..=2.0).contains(&config.temperature) {
            bail!(
                "Temperature must be between 0.0 and 2.0, got {}",
                config.temperature
            );
        }

        // Validate max_tokens
        if config.max_tokens == 0 {
            bail!("max_tokens must be greater than 0");
        }

        if config.provider.requires_api_key() && config.api_key.is_none() {
            match config.provider.api_key_env() {
                Some(var) => bail!(
                    "Provider '{}' requires an API key (set llm.api_key, POLIMINDER_LLM_API_KEY or {})",
                    config.provider,
                    var
                ),
                None => bail!("Provider '{}' requires an API key", config.provider),
            }
        }

        if config.provider == ProviderKind::Azure && config.base_url.is_none() {
            bail!("Provider 'azure' requires llm.base_url (resource endpoint)");
        }

        if let Some(url) = &config.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("llm.base_url must be an http(s) URL, got '{}'", url);
            }
        }

        Ok(())
    }

    fn validate_logging_config(&self, config: &LoggingSettings) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
            warn!("Unknown log level '{}', falling back to info", config.level);
        }
        Ok(())
    }

    fn validate_business_config(&self, config: &BusinessConfig) -> Result<()> {
        if config.company_name.trim().is_empty() {
            bail!("business.company_name must not be empty");
        }

        if config.upcoming_limit == 0 {
            warn!("business.upcoming_limit is 0, the dashboard will list no appointments");
        }

        if let Some(link) = &config.review_page_link {
            if !link.starts_with("https://") && !link.starts_with("http://") {
                bail!("business.review_page_link must be a URL, got '{}'", link);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> AppConfig {
        AppConfig {
            llm: LlmConfig {
                provider: ProviderKind::Local,
                ..LlmConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_local_provider_needs_no_key() {
        assert!(ConfigValidator::new().validate(&local_config()).is_ok());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut config = local_config();
        config.llm.temperature = 2.5;
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert!(err.to_string().contains("Temperature"));
    }

    #[test]
    fn test_hosted_provider_without_key() {
        let config = AppConfig::default();
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_review_link_must_be_url() {
        let mut config = local_config();
        config.business.review_page_link = Some("g.page/review".to_string());
        assert!(ConfigValidator::new().validate(&config).is_err());
    }
}
