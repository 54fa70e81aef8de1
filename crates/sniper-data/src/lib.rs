//! Price-table sources and result writers.

mod csv_source;
mod writer;

pub use csv_source::{parse_timestamp, CsvDataSource};
pub use writer::ResultWriter;

use sniper_core::error::DataError;
use sniper_core::types::PriceTable;
use std::path::PathBuf;

/// Load a multi-symbol price table from a CSV file, or from a directory of
/// per-symbol files, off the async runtime.
pub async fn load_table(path: impl Into<PathBuf>) -> Result<PriceTable, DataError> {
    let path = path.into();
    tokio::task::spawn_blocking(move || {
        if path.is_dir() {
            CsvDataSource::load_directory(&path)
        } else {
            CsvDataSource::new(&path)?.load_table()
        }
    })
    .await
    .map_err(|e| DataError::ParseError(format!("loader task failed: {}", e)))?
}
