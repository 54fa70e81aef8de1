//! CSV and JSON writers for analysis result sets.

use csv::WriterBuilder;
use sniper_analysis::AnalysisResult;
use sniper_core::error::DataError;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Writes ranked result sets to disk.
pub struct ResultWriter;

impl ResultWriter {
    /// Write one CSV row per result, in the given order.
    ///
    /// Returns the number of rows written. An empty result set writes
    /// nothing and leaves any existing file untouched.
    pub fn write_csv(path: impl AsRef<Path>, results: &[AnalysisResult]) -> Result<usize, DataError> {
        let path = path.as_ref();
        let Some(first) = results.first() else {
            debug!(path = %path.display(), "Empty result set, nothing written");
            return Ok(0);
        };

        ensure_parent(path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| DataError::WriteError(e.to_string()))?;

        let header: Vec<&str> = first.record().iter().map(|(name, _)| *name).collect();
        writer
            .write_record(&header)
            .map_err(|e| DataError::WriteError(e.to_string()))?;

        for result in results {
            writer
                .write_record(result.record().into_iter().map(|(_, value)| value))
                .map_err(|e| DataError::WriteError(e.to_string()))?;
        }

        writer
            .flush()
            .map_err(|e| DataError::WriteError(e.to_string()))?;

        info!(path = %path.display(), rows = results.len(), "Saved results");
        Ok(results.len())
    }

    /// Write the result set as pretty-printed JSON. Empty sets write nothing.
    pub fn write_json(path: impl AsRef<Path>, results: &[AnalysisResult]) -> Result<usize, DataError> {
        let path = path.as_ref();
        if results.is_empty() {
            debug!(path = %path.display(), "Empty result set, nothing written");
            return Ok(0);
        }

        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(results)
            .map_err(|e| DataError::WriteError(e.to_string()))?;
        fs::write(path, json).map_err(|e| DataError::WriteError(e.to_string()))?;

        info!(path = %path.display(), rows = results.len(), "Saved results");
        Ok(results.len())
    }
}

fn ensure_parent(path: &Path) -> Result<(), DataError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| DataError::WriteError(format!("{}: {}", parent.display(), e))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sniper_analysis::analyze_bars;
    use sniper_core::types::Bar;
    use tempfile::TempDir;

    fn result(symbol: &str, start: f64) -> AnalysisResult {
        let bars: Vec<Bar> = (0..30)
            .map(|i| {
                let c = start + i as f64;
                Bar::new(i * 86_400_000, c, c + 1.0, c - 1.0, c, 1_000.0)
            })
            .collect();
        analyze_bars(symbol, &bars).unwrap()
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("analyzed_data.csv");
        let results = vec![result("AAA", 10.0), result("BBB", 20.0)];

        assert_eq!(ResultWriter::write_csv(&path, &results).unwrap(), 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "symbol");
        assert!(headers.iter().any(|h| h == "rsi"));
        assert!(headers.iter().any(|h| h == "channel"));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "AAA");
        assert_eq!(&rows[1][1], "1970-01-30");
        assert_eq!(rows[0].len(), headers.len());
    }

    #[test]
    fn test_write_csv_empty_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.csv");

        assert_eq!(ResultWriter::write_csv(&path, &[]).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("analyzed_data.json");

        ResultWriter::write_json(&path, &[result("AAA", 10.0)]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["symbol"], "AAA");
        assert!(value[0]["scores"]["total_score"].is_number());
    }
}
