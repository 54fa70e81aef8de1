//! Stock screener CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sniper_config::load_config;
use sniper_monitor::setup_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;

    // Setup logging
    let level = cli
        .log_level
        .map_or(config.logging.level.as_str(), |level| level.as_str());
    let json = cli.json_logs || config.logging.is_json();
    let _guard = setup_logging(level, json, config.logging.file.as_deref().map(Path::new))
        .context("Failed to set up logging")?;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Signals(args) => cli::commands::signals::run(args, &config).await,
        Commands::Explain(args) => cli::commands::explain::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&config, cli.config.as_deref()),
    }
}
