//! Explain command implementation.

use anyhow::{Context, Result};
use sniper_analysis::{analyze_symbol, score_breakdown};
use sniper_config::AppConfig;
use sniper_monitor::render_explain;

use super::{input_path, load};
use crate::cli::ExplainArgs;

pub async fn run(args: ExplainArgs, config: &AppConfig) -> Result<()> {
    let input = input_path(args.input, config);
    let symbol = args.symbol.trim().to_uppercase();

    let table = load(&input).await?;
    let universe = table.group_by_symbol();
    let series = universe
        .get(&symbol)
        .with_context(|| format!("Symbol {} not found in {}", symbol, input.display()))?;

    let result = analyze_symbol(series)?;
    let breakdown = score_breakdown(&result.features);
    println!("{}", render_explain(&result, &breakdown));

    Ok(())
}
