//! Logging setup and plain-text summaries.

mod logging;
mod summary;

pub use logging::{setup_logging, LoggingError, LoggingGuard};
pub use summary::{render_explain, render_ranking, render_signals, render_summary};
