//! Validate configuration command.

use anyhow::{Context, Result};
use sniper_config::AppConfig;
use std::path::Path;

pub fn run(config: &AppConfig, config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {}", path.display()),
        None => println!("No configuration file given, using defaults and environment"),
    }

    config.validate()?;
    println!("Configuration is valid!");
    println!();
    print!("{}", config.to_toml().context("Failed to render configuration")?);

    Ok(())
}
