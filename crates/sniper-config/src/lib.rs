//! Configuration management.

mod settings;

pub use settings::{AnalysisSettings, AppConfig, AppSettings, LoggingConfig, PathSettings};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix, e.g. `SNIPER__ANALYSIS__WORKERS=4`.
pub const ENV_PREFIX: &str = "SNIPER";

/// Load configuration from an optional TOML file and the environment.
///
/// Every field has a default, so running without a file is valid.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: AppConfig = builder.add_source(env).build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        environment().source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_with_env(None, no_env()).unwrap();
        assert_eq!(config.analysis.min_stars_alert, 4);
        assert_eq!(config.analysis.top_n, 10);
        assert_eq!(config.analysis.workers, 0);
        assert_eq!(config.paths.raw_data, "data/raw_data.csv");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_and_env_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sniper.toml");
        fs::write(
            &path,
            "[analysis]\nworkers = 2\ntop_n = 5\n\n[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();

        let env = environment().source(Some(HashMap::from([(
            "SNIPER__ANALYSIS__WORKERS".to_string(),
            "8".to_string(),
        )])));
        let config = load_with_env(Some(&path), env).unwrap();

        assert_eq!(config.analysis.workers, 8);
        assert_eq!(config.analysis.top_n, 5);
        assert_eq!(config.analysis.min_stars_alert, 4);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_with_env(Some(Path::new("/no/such/sniper.toml")), no_env());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[analysis]\nmin_stars_alert = 7\n").unwrap();

        assert!(load_with_env(Some(&path), no_env()).is_err());
    }
}
