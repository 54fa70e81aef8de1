//! Plain-text summaries of a universe run.

use sniper_analysis::features::FeatureValue;
use sniper_analysis::{AnalysisResult, ScoreBreakdown, UniverseReport};

const RULE: &str =
    "------------------------------------------------------------------------------";

fn stars(count: u8) -> String {
    "*".repeat(count as usize)
}

fn ranking_header() -> String {
    format!(
        "{:<8} {:>10} {:>8} {:>9} {:<6} {:<10} {:<10}",
        "SYMBOL", "CLOSE", "QUALITY", "MOMENTUM", "STARS", "BUY", "CHANNEL"
    )
}

fn ranking_line(result: &AnalysisResult) -> String {
    format!(
        "{:<8} {:>10.2} {:>8.1} {:>9.1} {:<6} {:<10} {:<10}",
        result.symbol,
        result.close(),
        result.scores.quality_score,
        result.scores.momentum_score,
        stars(result.ratings.stars),
        result.signals.buy_signal,
        result.signals.channel,
    )
}

/// Ranked rows as a fixed-width table.
pub fn render_ranking(results: &[AnalysisResult]) -> String {
    let mut lines = vec![ranking_header(), RULE.to_string()];
    lines.extend(results.iter().map(ranking_line));
    lines.join("\n")
}

/// Buy setups, one per line.
pub fn render_signals(signals: &[&AnalysisResult]) -> String {
    if signals.is_empty() {
        return "No buy signals".to_string();
    }

    signals
        .iter()
        .map(|r| {
            format!(
                "{:<8} {:<10} {:<6} total {:>5.1}  sell {}",
                r.symbol,
                r.signals.buy_signal,
                stars(r.ratings.stars),
                r.scores.total_score,
                r.signals.sell_signal,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leaderboard, signal list and alert count for one run.
pub fn render_summary(report: &UniverseReport, top_n: usize, min_stars: u8) -> String {
    let signals = report.signals();
    let alerts = report.signals_with_min_stars(min_stars);

    let mut sections = vec![
        format!(
            "Analyzed {} symbols ({} skipped), {} buy signals, {} rated {}+ stars",
            report.len(),
            report.skipped.len(),
            signals.len(),
            alerts.len(),
            min_stars,
        ),
        String::new(),
        format!("Top {} by total score", top_n.min(report.len())),
        render_ranking(report.top(top_n)),
        String::new(),
        format!("Buy signals ({})", signals.len()),
        render_signals(&signals),
    ];

    if !report.skipped.is_empty() {
        sections.push(String::new());
        sections.push("Skipped".to_string());
        sections.extend(report.skipped.iter().map(|s| format!("  {}", s.reason)));
    }

    sections.join("\n")
}

/// Every feature of one symbol plus the rules behind its scores.
pub fn render_explain(result: &AnalysisResult, breakdown: &ScoreBreakdown) -> String {
    let mut lines = vec![
        format!(
            "{} @ {}  close {:.2}  volume {:.0}",
            result.symbol,
            result.bar.date(),
            result.close(),
            result.bar.volume
        ),
        RULE.to_string(),
    ];

    for (name, value) in result.features.entries() {
        let shown = match value {
            FeatureValue::Number(None) => "n/a".to_string(),
            FeatureValue::Number(Some(v)) => format!("{:.4}", v),
            other => other.to_string(),
        };
        lines.push(format!("{:<22} {}", name, shown));
    }

    lines.push(RULE.to_string());
    lines.push(format!(
        "quality  {:>5.1}  (rating {})",
        result.scores.quality_score, result.ratings.quality_rating
    ));
    lines.extend(
        breakdown
            .quality
            .iter()
            .map(|c| format!("  {:<20} {:+.1}", c.rule, c.points)),
    );
    lines.push(format!(
        "momentum {:>5.1}  (rating {})",
        result.scores.momentum_score, result.ratings.momentum_rating
    ));
    lines.extend(
        breakdown
            .momentum
            .iter()
            .map(|c| format!("  {:<20} {:+.1}", c.rule, c.points)),
    );
    lines.push(format!(
        "total    {:>5.1}  {}",
        result.scores.total_score,
        stars(result.ratings.stars)
    ));
    lines.push(format!(
        "buy {}  sell {}  channel {}",
        result.signals.buy_signal, result.signals.sell_signal, result.signals.channel
    ));

    lines.join("\n")
}
