//! Error types for the screener.

use thiserror::Error;

/// Data source and sink errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("No data available")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Write error: {0}")]
    WriteError(String),
}

/// Per-symbol analysis errors. These never abort a universe run; the
/// aggregator logs them and skips the symbol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("{symbol}: empty price series")]
    EmptySeries { symbol: String },

    #[error("{symbol}: non-finite {field} at bar {index}")]
    InvalidBar {
        symbol: String,
        field: &'static str,
        index: usize,
    },

    #[error("{symbol}: bars out of order at index {index}")]
    Unordered { symbol: String, index: usize },
}

impl AnalysisError {
    /// Symbol the error refers to.
    pub fn symbol(&self) -> &str {
        match self {
            AnalysisError::EmptySeries { symbol }
            | AnalysisError::InvalidBar { symbol, .. }
            | AnalysisError::Unordered { symbol, .. } => symbol,
        }
    }
}
