//! Universe aggregation.
//!
//! Runs the per-symbol pipeline over every symbol in a price table, skips
//! symbols whose data is unusable, and ranks the rest by total score.

use crate::features::{compute_features, FeatureRow};
use crate::params::PROGRESS_EVERY;
use crate::rating::Ratings;
use crate::scoring::{score, Scores};
use crate::signal::{classify, Signals};
use rayon::prelude::*;
use serde::Serialize;
use sniper_core::error::AnalysisError;
use sniper_core::types::{Bar, BarSeries, PriceTable};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use tracing::{debug, info, warn};

/// Everything computed for one symbol at its latest bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub symbol: String,
    /// Latest bar
    pub bar: Bar,
    pub features: FeatureRow,
    pub scores: Scores,
    pub ratings: Ratings,
    pub signals: Signals,
}

impl AnalysisResult {
    /// Latest close.
    pub fn close(&self) -> f64 {
        self.bar.close
    }

    /// Flat `(column, value)` record: raw bar, features, scores, ratings, signals.
    pub fn record(&self) -> Vec<(&'static str, String)> {
        let mut record = vec![
            ("symbol", self.symbol.clone()),
            ("time", self.bar.date().to_string()),
            ("open", self.bar.open.to_string()),
            ("high", self.bar.high.to_string()),
            ("low", self.bar.low.to_string()),
            ("close", self.bar.close.to_string()),
            ("volume", self.bar.volume.to_string()),
        ];
        record.extend(
            self.features
                .entries()
                .into_iter()
                .map(|(name, value)| (name, value.to_string())),
        );
        record.extend([
            ("quality_score", self.scores.quality_score.to_string()),
            ("momentum_score", self.scores.momentum_score.to_string()),
            ("total_score", self.scores.total_score.to_string()),
            ("quality_rating", self.ratings.quality_rating.to_string()),
            ("momentum_rating", self.ratings.momentum_rating.to_string()),
            ("stars", self.ratings.stars.to_string()),
            ("buy_signal", self.signals.buy_signal.to_string()),
            ("sell_signal", self.signals.sell_signal.to_string()),
            ("channel", self.signals.channel.to_string()),
        ]);
        record
    }
}

/// A symbol left out of the result set.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: AnalysisError,
}

/// Check that bars are usable: non-empty, finite, time-ascending.
fn validate(symbol: &str, bars: &[Bar]) -> Result<(), AnalysisError> {
    if bars.is_empty() {
        return Err(AnalysisError::EmptySeries {
            symbol: symbol.to_string(),
        });
    }

    for (index, bar) in bars.iter().enumerate() {
        if let Some(field) = bar.first_non_finite() {
            return Err(AnalysisError::InvalidBar {
                symbol: symbol.to_string(),
                field,
                index,
            });
        }
        if index > 0 && bar.timestamp < bars[index - 1].timestamp {
            return Err(AnalysisError::Unordered {
                symbol: symbol.to_string(),
                index,
            });
        }
    }

    Ok(())
}

/// Analyze one symbol's time-ascending bars.
pub fn analyze_bars(symbol: &str, bars: &[Bar]) -> Result<AnalysisResult, AnalysisError> {
    validate(symbol, bars)?;
    let bar = *bars.last().ok_or_else(|| AnalysisError::EmptySeries {
        symbol: symbol.to_string(),
    })?;

    let features = compute_features(bars);
    let scores = score(&features);
    let ratings = Ratings::from_scores(&scores);
    let signals = classify(&features, &scores);

    Ok(AnalysisResult {
        symbol: symbol.to_string(),
        bar,
        features,
        scores,
        ratings,
        signals,
    })
}

/// Analyze one symbol's series.
pub fn analyze_symbol(series: &BarSeries) -> Result<AnalysisResult, AnalysisError> {
    analyze_bars(&series.symbol, series.bars())
}

/// Ranked results of a universe run.
#[derive(Debug, Clone, Default)]
pub struct UniverseReport {
    /// Sorted by total score descending, then symbol ascending
    pub results: Vec<AnalysisResult>,
    /// Symbols excluded because their data was unusable, by symbol
    pub skipped: Vec<SkippedSymbol>,
}

impl UniverseReport {
    fn new(mut results: Vec<AnalysisResult>, skipped: Vec<SkippedSymbol>) -> Self {
        results.sort_by(rank_order);
        Self { results, skipped }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Rows with a buy setup, in rank order.
    pub fn signals(&self) -> Vec<&AnalysisResult> {
        self.results
            .iter()
            .filter(|r| r.signals.buy_signal.is_some())
            .collect()
    }

    /// Buy setups rated at least `min_stars`.
    pub fn signals_with_min_stars(&self, min_stars: u8) -> Vec<&AnalysisResult> {
        self.results
            .iter()
            .filter(|r| r.signals.buy_signal.is_some() && r.ratings.stars >= min_stars)
            .collect()
    }

    /// First `n` ranked rows.
    pub fn top(&self, n: usize) -> &[AnalysisResult] {
        &self.results[..n.min(self.results.len())]
    }

    /// Result for one symbol.
    pub fn get(&self, symbol: &str) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.symbol == symbol)
    }
}

fn rank_order(a: &AnalysisResult, b: &AnalysisResult) -> Ordering {
    b.scores
        .total_score
        .total_cmp(&a.scores.total_score)
        .then_with(|| a.symbol.cmp(&b.symbol))
}

/// Drives the per-symbol pipeline across a universe.
///
/// `workers == 0` runs on the calling thread; otherwise symbols are spread
/// over a private rayon pool of that size. Output is the same either way.
#[derive(Debug, Clone, Default)]
pub struct UniverseAnalyzer {
    workers: usize,
}

impl UniverseAnalyzer {
    /// Sequential analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with a worker pool of `workers` threads (0 = sequential).
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Group a raw table by symbol and analyze every series.
    pub fn analyze_table(&self, table: &PriceTable) -> UniverseReport {
        self.analyze(&table.group_by_symbol())
    }

    /// Analyze pre-grouped series.
    pub fn analyze(&self, universe: &BTreeMap<String, BarSeries>) -> UniverseReport {
        let total = universe.len();
        if total == 0 {
            info!("No symbols to analyze");
            return UniverseReport::default();
        }

        info!(symbols = total, workers = self.workers, "Analyzing universe");
        let done = AtomicUsize::new(0);
        let run = |series: &BarSeries| {
            let outcome = analyze_symbol(series);
            let finished = done.fetch_add(1, AtomicOrdering::Relaxed) + 1;
            if finished % PROGRESS_EVERY == 0 {
                debug!(done = finished, total, "Analysis progress");
            }
            outcome
        };

        let outcomes: Vec<Result<AnalysisResult, AnalysisError>> = match self.pool() {
            Some(pool) => pool.install(|| universe.par_iter().map(|(_, s)| run(s)).collect()),
            None => universe.values().map(run).collect(),
        };

        let mut results = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(symbol = err.symbol(), error = %err, "Skipping symbol");
                    skipped.push(SkippedSymbol {
                        symbol: err.symbol().to_string(),
                        reason: err,
                    });
                }
            }
        }

        let report = UniverseReport::new(results, skipped);
        info!(
            analyzed = report.len(),
            skipped = report.skipped.len(),
            signals = report.signals().len(),
            "Universe analysis complete"
        );
        report
    }

    fn pool(&self) -> Option<rayon::ThreadPool> {
        if self.workers == 0 {
            return None;
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!(error = %err, "Failed to build worker pool, running sequentially");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniper_core::types::BuySignal;

    const DAY_MS: i64 = 86_400_000;

    fn bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(i as i64 * DAY_MS, c, c * 1.01, c * 0.99, c, 10_000.0))
            .collect()
    }

    fn wave(n: usize, base: f64, phase: f64) -> Vec<f64> {
        (0..n)
            .map(|i| base + (i as f64 * 0.3 + phase).sin() * base * 0.05)
            .collect()
    }

    fn table(symbols: &[(&str, Vec<f64>)]) -> PriceTable {
        let mut table = PriceTable::default();
        for (symbol, closes) in symbols {
            for bar in bars(closes) {
                table.push(*symbol, bar);
            }
        }
        table
    }

    #[test]
    fn test_analyze_bars_rejects_empty() {
        let err = analyze_bars("AAA", &[]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptySeries {
                symbol: "AAA".to_string()
            }
        );
    }

    #[test]
    fn test_analyze_bars_rejects_non_finite() {
        let mut data = bars(&wave(30, 10.0, 0.0));
        data[7].close = f64::NAN;

        let err = analyze_bars("BBB", &data).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidBar {
                field: "close",
                index: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_analyze_bars_rejects_unordered() {
        let mut data = bars(&wave(10, 10.0, 0.0));
        data.swap(3, 4);

        let err = analyze_bars("CCC", &data).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Unordered {
                symbol: "CCC".to_string(),
                index: 4
            }
        );
    }

    #[test]
    fn test_single_bar_is_analyzed() {
        let result = analyze_bars("ONE", &bars(&[12.5])).unwrap();
        assert!((result.close() - 12.5).abs() < 1e-10);
        assert!(result.features.rsi.is_none());
        assert_eq!(result.signals.buy_signal, BuySignal::None);
    }

    #[test]
    fn test_empty_table() {
        let report = UniverseAnalyzer::new().analyze_table(&PriceTable::default());
        assert!(report.is_empty());
        assert!(report.skipped.is_empty());
        assert!(report.signals().is_empty());
    }

    #[test]
    fn test_bad_symbol_is_skipped() {
        let mut table = table(&[("GOOD", wave(80, 20.0, 0.0))]);
        table.push("BAD", Bar::new(0, 1.0, f64::INFINITY, 1.0, 1.0, 1.0));

        let report = UniverseAnalyzer::new().analyze_table(&table);
        assert_eq!(report.len(), 1);
        assert_eq!(report.results[0].symbol, "GOOD");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].symbol, "BAD");
    }

    #[test]
    fn test_results_are_ranked() {
        let table = table(&[
            ("AAA", wave(120, 30.0, 0.0)),
            ("BBB", wave(120, 30.0, 1.5)),
            ("CCC", wave(120, 30.0, 3.0)),
            ("DDD", (0..120).map(|i| 10.0 + i as f64 * 0.2).collect()),
        ]);

        let report = UniverseAnalyzer::new().analyze_table(&table);
        assert_eq!(report.len(), 4);
        for pair in report.results.windows(2) {
            assert_ne!(rank_order(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_ties_break_by_symbol() {
        let closes = wave(60, 15.0, 0.7);
        let table = table(&[("ZZZ", closes.clone()), ("AAA", closes.clone()), ("MMM", closes)]);

        let report = UniverseAnalyzer::new().analyze_table(&table);
        let symbols: Vec<&str> = report.results.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "MMM", "ZZZ"]);
    }

    #[test]
    fn test_worker_pool_matches_sequential() {
        let symbols: Vec<(String, Vec<f64>)> = (0..12)
            .map(|i| (format!("S{i:02}"), wave(90, 10.0 + i as f64, i as f64 * 0.4)))
            .collect();
        let refs: Vec<(&str, Vec<f64>)> = symbols
            .iter()
            .map(|(s, c)| (s.as_str(), c.clone()))
            .collect();
        let table = table(&refs);

        let sequential = UniverseAnalyzer::new().analyze_table(&table);
        let parallel = UniverseAnalyzer::with_workers(4).analyze_table(&table);
        assert_eq!(sequential.results, parallel.results);
    }

    #[test]
    fn test_top_and_star_filter() {
        let table = table(&[("AAA", wave(70, 8.0, 0.0)), ("BBB", wave(70, 9.0, 2.0))]);
        let report = UniverseAnalyzer::new().analyze_table(&table);

        assert_eq!(report.top(1).len(), 1);
        assert_eq!(report.top(10).len(), 2);
        assert_eq!(report.top(0).len(), 0);

        for row in report.signals_with_min_stars(4) {
            assert!(row.ratings.stars >= 4);
            assert!(row.signals.buy_signal.is_some());
        }
        assert!(report.signals_with_min_stars(6).is_empty());
        assert!(report.get("AAA").is_some());
        assert!(report.get("ZZZ").is_none());
    }

    #[test]
    fn test_record_columns() {
        let result = analyze_bars("REC", &bars(&wave(40, 5.0, 0.0))).unwrap();
        let record = result.record();

        assert_eq!(record[0], ("symbol", "REC".to_string()));
        assert_eq!(record[1].0, "time");
        assert_eq!(record.last().unwrap().0, "channel");
        assert_eq!(record.len(), 7 + result.features.entries().len() + 9);
    }
}
