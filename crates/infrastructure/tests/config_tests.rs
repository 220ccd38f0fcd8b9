use domain::config::*;
use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
use std::env;
use tempfile::TempDir;
use tokio::fs;

// Every test uses its own env prefix so parallel tests never see each other's variables.

#[tokio::test]
async fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let loader = ConfigLoader::new()
        .with_paths(vec![temp_dir.path().join("missing.toml")])
        .with_env_prefix("PM_TEST_DEFAULTS_")
        .without_provider_key_fallback();
    let (config, source) = loader.load_with_source().await?;

    assert_eq!(source, ConfigSource::Default);
    assert_eq!(config.profile, Profile::Dev);
    assert_eq!(config.llm.provider, ProviderKind::OpenAI);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.business.company_name, "PoliMinder");
    assert_eq!(config.business.upcoming_limit, 5);

    Ok(())
}

#[tokio::test]
async fn test_config_loader_from_toml() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("poliminder.toml");

    let toml_content = r#"
profile = "prod"

[llm]
provider = "anthropic"
max_tokens = 2048
temperature = 0.3
api_key = "ant-secret"

[logging]
level = "debug"

[business]
company_name = "Sparkle Co"
review_page_link = "https://g.page/review/abc"
"#;
    fs::write(&config_path, toml_content).await?;

    let loader = ConfigLoader::new()
        .with_paths(vec![config_path.clone()])
        .with_env_prefix("PM_TEST_TOML_")
        .without_provider_key_fallback();
    let (config, source) = loader.load_with_source().await?;

    assert_eq!(source, ConfigSource::File(config_path));
    assert_eq!(config.profile, Profile::Prod);
    assert_eq!(config.llm.provider, ProviderKind::Anthropic);
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.llm.api_key.as_deref(), Some("ant-secret"));
    assert_eq!(config.logging.level, "debug");
    // prod profile switches to JSON logs
    assert!(config.logging.json);
    assert_eq!(config.business.company_name, "Sparkle Co");
    assert!(ConfigValidator::new().validate(&config).is_ok());

    Ok(())
}

#[tokio::test]
async fn test_config_loader_from_json() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join(".poliminderrc.json");

    let json_content = r#"{
  "llm": { "provider": "local", "model": "qwen2", "base_url": "http://localhost:11434/v1" },
  "business": { "upcoming_limit": 3 }
}"#;
    fs::write(&config_path, json_content).await?;

    let loader = ConfigLoader::new()
        .with_paths(vec![config_path])
        .with_env_prefix("PM_TEST_JSON_")
        .without_provider_key_fallback();
    let config = loader.load().await?;

    assert_eq!(config.llm.provider, ProviderKind::Local);
    assert_eq!(config.llm.model_name(), "qwen2");
    assert_eq!(config.business.upcoming_limit, 3);
    assert!(ConfigValidator::new().validate(&config).is_ok());

    Ok(())
}

#[tokio::test]
async fn test_broken_file_falls_through_to_next_path() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let broken = temp_dir.path().join("poliminder.toml");
    let good = temp_dir.path().join("config.toml");
    fs::write(&broken, "this is = = not toml").await?;
    fs::write(&good, "[logging]\nlevel = \"warn\"\n").await?;

    let loader = ConfigLoader::new()
        .with_paths(vec![broken, good.clone()])
        .with_env_prefix("PM_TEST_BROKEN_")
        .without_provider_key_fallback();
    let (config, source) = loader.load_with_source().await?;

    assert_eq!(source, ConfigSource::File(good));
    assert_eq!(config.logging.level, "warn");

    Ok(())
}

#[tokio::test]
async fn test_env_overrides() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let prefix = "PM_TEST_ENV_";

    env::set_var(format!("{prefix}ENV"), "production");
    env::set_var(format!("{prefix}LLM_PROVIDER"), "groq");
    env::set_var(format!("{prefix}LLM_API_KEY"), "gsk-env");
    env::set_var(format!("{prefix}LOG_LEVEL"), "trace");
    env::set_var(format!("{prefix}COMPANY_NAME"), "Env Cleaners");

    let loader = ConfigLoader::new()
        .with_paths(vec![temp_dir.path().join("none.toml")])
        .with_env_prefix(prefix)
        .without_provider_key_fallback();
    let config = loader.load().await?;

    assert_eq!(config.profile, Profile::Prod);
    assert!(config.logging.json);
    assert_eq!(config.llm.provider, ProviderKind::Groq);
    assert_eq!(config.llm.api_key.as_deref(), Some("gsk-env"));
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.business.company_name, "Env Cleaners");

    Ok(())
}

#[tokio::test]
async fn test_invalid_env_provider_is_an_error() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let prefix = "PM_TEST_BAD_PROVIDER_";
    env::set_var(format!("{prefix}LLM_PROVIDER"), "carrier-pigeon");

    let loader = ConfigLoader::new()
        .with_paths(vec![temp_dir.path().join("none.toml")])
        .with_env_prefix(prefix);
    let err = loader.load().await.unwrap_err();

    assert!(format!("{err:#}").contains("LLM_PROVIDER"));
    Ok(())
}
