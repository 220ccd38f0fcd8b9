use anyhow::{bail, Context, Result};
use application::Workspace;
use chrono::Local;
use clap::{Parser, Subcommand};
use common::{init_structured_logging, LoggingConfig};
use domain::config::AppConfig;
use infrastructure::config::ConfigLoader;
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod progress;
mod render;

use commands::{ai::AiCommand, board::BoardCommand, config::ConfigCommand, views::ViewCommand};

#[derive(Parser)]
#[command(name = "poliminder")]
#[command(about = "PoliMinder - field service workspace for appointments, tasks and AI tools")]
#[command(version)]
struct Cli {
    /// Configuration file (otherwise the default search paths are used)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    View(ViewCommand),
    #[command(flatten)]
    Board(BoardCommand),
    #[command(flatten)]
    Ai(AiCommand),
    /// Inspect or generate configuration
    Config(ConfigCommand),
}

fn logging_config(config: &AppConfig) -> LoggingConfig {
    let mut logging = LoggingConfig::default()
        .with_level_str(&config.logging.level)
        .json(config.logging.json);
    logging.color_output = config.logging.color && console::colors_enabled_stderr();
    logging.include_line_numbers = config.logging.include_line_numbers;
    logging
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) if !path.exists() => {
            bail!("Configuration file {} does not exist", path.display())
        }
        Some(path) => ConfigLoader::new().with_paths(vec![path.clone()]),
        None => ConfigLoader::new(),
    };
    let (config, source) = loader
        .load_with_source()
        .await
        .context("Failed to load configuration")?;

    init_structured_logging(logging_config(&config))?;
    debug!(?source, profile = ?config.profile, "Configuration loaded");

    // every invocation works on a freshly seeded session
    let mut workspace = Workspace::seeded(Local::now(), config.business.clone());

    match cli.command {
        Commands::View(cmd) => cmd.execute(&workspace),
        Commands::Board(cmd) => cmd.execute(&mut workspace),
        Commands::Ai(cmd) => cmd.execute(&mut workspace, &config).await,
        Commands::Config(cmd) => cmd.execute(&config, &source).await,
    }
}
