//! Screening engine: per-symbol features, scores, ratings and signals.
//!
//! Data flows leaf-first through the modules:
//! - [`features`]: latest-bar feature row from one symbol's bars
//! - [`scoring`]: quality and momentum scores from a feature row
//! - [`rating`]: 1-5 ratings and the combined star rating
//! - [`signal`]: buy/sell classification
//! - [`universe`]: runs the above over every symbol and ranks the results
//!
//! Every stage is a pure function of its input; nothing is cached between runs.

pub mod features;
pub mod params;
pub mod rating;
pub mod scoring;
pub mod signal;
pub mod universe;

pub use features::{compute_features, FeatureRow, FeatureValue};
pub use rating::{momentum_rating, quality_rating, star_rating, Ratings};
pub use scoring::{score, score_breakdown, Contribution, ScoreBreakdown, Scores};
pub use signal::{classify, classify_buy, classify_sell, Signals};
pub use universe::{
    analyze_bars, analyze_symbol, AnalysisResult, SkippedSymbol, UniverseAnalyzer, UniverseReport,
};
