//! Analyze command implementation.

use anyhow::{Context, Result};
use sniper_analysis::{AnalysisResult, UniverseReport};
use sniper_config::AppConfig;
use sniper_data::ResultWriter;
use sniper_monitor::render_summary;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{analyze, input_path, load};
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let input = input_path(args.input, config);
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.paths.analyzed_data));
    let signals_path = args
        .signals
        .unwrap_or_else(|| PathBuf::from(&config.paths.signals));
    let workers = args.workers.unwrap_or(config.analysis.workers);
    let top_n = args.top.unwrap_or(config.analysis.top_n);
    let min_stars = args.min_stars.unwrap_or(config.analysis.min_stars_alert);

    info!(input = %input.display(), workers, "Starting analysis");
    let table = load(&input).await?;
    let report = analyze(table, workers).await?;

    save_results(&report, &output, &signals_path, args.json.as_deref())?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report.results)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", render_summary(&report, top_n, min_stars));
        }
    }

    Ok(())
}

/// Write the ranked set and the signals subset, plus the JSON copy if asked.
fn save_results(
    report: &UniverseReport,
    output: &Path,
    signals_path: &Path,
    json: Option<&Path>,
) -> Result<()> {
    ResultWriter::write_csv(output, &report.results)
        .with_context(|| format!("Failed to save results to {}", output.display()))?;

    let signals: Vec<AnalysisResult> = report.signals().into_iter().cloned().collect();
    ResultWriter::write_csv(signals_path, &signals)
        .with_context(|| format!("Failed to save signals to {}", signals_path.display()))?;

    if let Some(json) = json {
        ResultWriter::write_json(json, &report.results)
            .with_context(|| format!("Failed to save results to {}", json.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniper_analysis::UniverseAnalyzer;
    use sniper_core::types::{Bar, PriceTable};
    use tempfile::TempDir;

    fn report() -> UniverseReport {
        let mut table = PriceTable::default();
        for i in 0..60 {
            let c = 10.0 + 0.1 * i as f64;
            table.push("AAA", Bar::new(i * 86_400_000, c, c * 1.01, c * 0.99, c, 5_000.0));
        }
        UniverseAnalyzer::new().analyze_table(&table)
    }

    #[test]
    fn test_save_results_writes_json_copy() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("analyzed.csv");
        let signals = dir.path().join("signals.csv");
        let json = dir.path().join("out/analyzed.json");

        save_results(&report(), &output, &signals, Some(&json)).unwrap();

        assert!(output.exists());
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(parsed[0]["symbol"], "AAA");
    }

    #[test]
    fn test_save_results_without_json() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("analyzed.csv");
        let signals = dir.path().join("signals.csv");

        save_results(&report(), &output, &signals, None).unwrap();

        assert!(output.exists());
        let json_files = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .count();
        assert_eq!(json_files, 0);
    }
}
