//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sniper")]
#[command(author, version, about = "Daily equity screener: indicators, scores and buy/sell signals")]
pub struct Cli {
    /// Configuration file path (defaults apply when omitted)
    #[arg(short, long, env = "SNIPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configured one
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every symbol, save the ranked results and the signals
    Analyze(AnalyzeArgs),
    /// Print buy signals at or above a star rating
    Signals(SignalsArgs),
    /// Show the features and score breakdown of one symbol
    Explain(ExplainArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Price table: a multi-symbol CSV or a directory of {SYMBOL}.csv files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Ranked result set (CSV)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Signals subset (CSV)
    #[arg(long)]
    pub signals: Option<PathBuf>,

    /// Also save the ranked result set as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Worker threads (0 = sequential)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Rows shown in the ranking
    #[arg(long)]
    pub top: Option<usize>,

    /// Minimum stars counted as an alert
    #[arg(long)]
    pub min_stars: Option<u8>,
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    /// Price table: a multi-symbol CSV or a directory of {SYMBOL}.csv files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Minimum star rating
    #[arg(long)]
    pub min_stars: Option<u8>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args)]
pub struct ExplainArgs {
    /// Price table: a multi-symbol CSV or a directory of {SYMBOL}.csv files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Symbol to explain
    #[arg(short, long)]
    pub symbol: String,
}
