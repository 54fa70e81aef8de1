//! CLI command implementations.

pub mod analyze;
pub mod explain;
pub mod signals;
pub mod validate;

use anyhow::{Context, Result};
use sniper_analysis::{UniverseAnalyzer, UniverseReport};
use sniper_config::AppConfig;
use sniper_core::types::PriceTable;
use std::path::{Path, PathBuf};

/// Input path from the flag, else the configured raw data file.
fn input_path(input: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    input.unwrap_or_else(|| PathBuf::from(&config.paths.raw_data))
}

async fn load(input: &Path) -> Result<PriceTable> {
    sniper_data::load_table(input)
        .await
        .with_context(|| format!("Failed to load price table from {}", input.display()))
}

/// Analyze a table on the blocking pool.
async fn analyze(table: PriceTable, workers: usize) -> Result<UniverseReport> {
    tokio::task::spawn_blocking(move || UniverseAnalyzer::with_workers(workers).analyze_table(&table))
        .await
        .context("Analysis task failed")
}
