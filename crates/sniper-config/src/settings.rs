//! Configuration structures.

use config::ConfigError;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub paths: PathSettings,
}

impl AppConfig {
    /// Reject values the screener cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Message(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        if !(1..=5).contains(&self.analysis.min_stars_alert) {
            return Err(ConfigError::Message(format!(
                "analysis.min_stars_alert must be between 1 and 5, got {}",
                self.analysis.min_stars_alert
            )));
        }
        if self.analysis.top_n == 0 {
            return Err(ConfigError::Message(
                "analysis.top_n must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stock-sniper".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Universe analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Worker threads; 0 runs sequentially.
    pub workers: usize,
    /// Minimum stars for the alert list.
    pub min_stars_alert: u8,
    /// Rows shown in the ranking summary.
    pub top_n: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            workers: 0,
            min_stars_alert: 4,
            top_n: 10,
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub raw_data: String,
    pub analyzed_data: String,
    pub signals: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            raw_data: "data/raw_data.csv".to_string(),
            analyzed_data: "data/analyzed_data.csv".to_string(),
            signals: "data/signals.csv".to_string(),
        }
    }
}
