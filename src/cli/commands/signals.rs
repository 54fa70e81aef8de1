//! Signals command implementation.

use anyhow::Result;
use sniper_config::AppConfig;
use sniper_monitor::render_signals;

use super::{analyze, input_path, load};
use crate::cli::{OutputFormat, SignalsArgs};

pub async fn run(args: SignalsArgs, config: &AppConfig) -> Result<()> {
    let input = input_path(args.input, config);
    let min_stars = args.min_stars.unwrap_or(config.analysis.min_stars_alert);

    let table = load(&input).await?;
    let report = analyze(table, config.analysis.workers).await?;
    let signals = report.signals_with_min_stars(min_stars);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&signals)?),
        OutputFormat::Text => {
            println!("Buy signals rated {}+ stars ({})", min_stars, signals.len());
            println!("{}", render_signals(&signals));
        }
    }

    Ok(())
}
