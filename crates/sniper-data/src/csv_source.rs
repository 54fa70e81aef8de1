//! CSV price-table source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use sniper_core::error::DataError;
use sniper_core::types::{Bar, PriceRow, PriceTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Time",
        alias = "date",
        alias = "Date",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    time: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
    #[serde(alias = "Symbol", alias = "ticker", alias = "Ticker", default)]
    symbol: Option<String>,
}

/// CSV data source for daily price history.
///
/// A file either carries a symbol column (the multi-symbol raw table) or
/// holds a single symbol named after the file.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the multi-symbol price table.
    ///
    /// Symbols are uppercased so lookups do not depend on the file's casing.
    /// Rows without a symbol are an error here; use
    /// [`load_directory`](Self::load_directory) for per-symbol files.
    pub fn load_table(&self) -> Result<PriceTable, DataError> {
        let rows = self.load_rows(None)?;
        info!(
            path = %self.path.display(),
            rows = rows.len(),
            "Loaded price table"
        );
        Ok(PriceTable::new(rows))
    }

    /// Load every `{SYMBOL}.csv` in a directory into one table.
    ///
    /// The file stem is the symbol unless a row names its own.
    pub fn load_directory(dir: impl AsRef<Path>) -> Result<PriceTable, DataError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir)
            .map_err(|e| DataError::NotFound(format!("{}: {}", dir.display(), e)))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
            })
            .collect();
        files.sort();

        let mut rows = Vec::new();
        for file in &files {
            let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = CsvDataSource::new(file)?;
            let loaded = source.load_rows(Some(&stem.to_uppercase()))?;
            debug!(file = %file.display(), rows = loaded.len(), "Loaded symbol file");
            rows.extend(loaded);
        }

        if rows.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        info!(
            dir = %dir.display(),
            files = files.len(),
            rows = rows.len(),
            "Loaded price directory"
        );
        Ok(PriceTable::new(rows))
    }

    /// Read all rows, falling back to `default_symbol` for rows without one.
    fn load_rows(&self, default_symbol: Option<&str>) -> Result<Vec<PriceRow>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut rows = Vec::new();

        for (line, result) in reader.deserialize().enumerate() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let symbol = record
                .symbol
                .filter(|s| !s.is_empty())
                .as_deref()
                .or(default_symbol)
                .map(str::to_uppercase)
                .ok_or_else(|| {
                    DataError::ParseError(format!("row {}: missing symbol", line + 1))
                })?;

            let timestamp = parse_timestamp(&record.time)?;

            rows.push(PriceRow {
                symbol,
                bar: Bar::new(
                    timestamp,
                    record.open,
                    record.high,
                    record.low,
                    record.close,
                    record.volume,
                ),
            });
        }

        Ok(rows)
    }
}

/// Parse various timestamp formats into Unix milliseconds.
pub fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let date_str = date_str.trim();

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
