use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use domain::config::AppConfig;
use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Generate an example configuration file
    #[command(alias = "gen")]
    Generate {
        /// Output path for the configuration file
        #[arg(short, long, default_value = "poliminder.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the resolved configuration
    #[command(alias = "check")]
    Validate,

    /// Show the resolved configuration (API key redacted)
    Show,
}

impl ConfigCommand {
    pub async fn execute(self, config: &AppConfig, source: &ConfigSource) -> Result<()> {
        match self.command {
            ConfigSubcommand::Generate { output, force } => generate(&output, force).await,
            ConfigSubcommand::Validate => validate(config, source),
            ConfigSubcommand::Show => show(config, source),
        }
    }
}

async fn generate(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        warn!("Configuration file already exists at: {}", output.display());
        println!(
            "{} {} already exists, use --force to overwrite",
            style("✗").red(),
            output.display()
        );
        return Ok(());
    }

    tokio::fs::write(output, ConfigLoader::generate_example_config()).await?;
    info!("Configuration file generated at: {}", output.display());

    println!("✅ Configuration file created: {}", output.display());
    println!("📝 Key sections:");
    println!("   - [llm]      provider, model and API key");
    println!("   - [logging]  level and JSON output");
    println!("   - [business] company name and review page link");
    Ok(())
}

fn validate(config: &AppConfig, source: &ConfigSource) -> Result<()> {
    print_source(source);
    match ConfigValidator::new().validate(config) {
        Ok(()) => {
            println!("✅ Configuration is valid!");
            Ok(())
        }
        Err(e) => {
            println!("❌ Configuration validation failed:");
            println!("   {e}");
            Err(e)
        }
    }
}

fn show(config: &AppConfig, source: &ConfigSource) -> Result<()> {
    print_source(source);
    let mut redacted = config.clone();
    if redacted.llm.api_key.is_some() {
        redacted.llm.api_key = Some("***".to_string());
    }
    println!("{}", toml::to_string_pretty(&redacted)?);
    Ok(())
}

fn print_source(source: &ConfigSource) {
    match source {
        ConfigSource::File(path) => println!("# Loaded from {}", path.display()),
        ConfigSource::Default => println!("# Built-in defaults (no config file found)"),
    }
}
