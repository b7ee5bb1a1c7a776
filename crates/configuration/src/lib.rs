use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod benchmarks;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use benchmarks::{exclude_symbol, select_benchmarks, BenchmarkPreset, BenchmarkSet};
pub use settings::{AnalysisSettings, Config, ApiConfig, BenchmarkSettings, API_TOKEN_ENV};

/// Prefix for environment overrides, e.g. `CAPM__ANALYSIS__RISK_FREE_RATE=0.01`.
const ENV_PREFIX: &str = "CAPM";

/// Loads the application configuration from an optional `config.toml` in the
/// working directory, layered with `CAPM__*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name("config.toml").required(false))
}

/// Loads the configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path).required(true))
}

fn build<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .set_default("analysis.risk_free_rate", 0.002)?
        .set_default("analysis.start_date", "2020-01-01")?
        .set_default("analysis.interval", "daily")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    tracing::debug!(analysis = ?config.analysis, "Configuration loaded.");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Interval;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_file() {
        let file = write_toml(
            r#"
            [analysis]
            risk_free_rate = 0.015
            start_date = "2019-03-01"
            interval = "weekly"

            [api]
            base_url = "https://api.tradier.com/v1"
            timeout_secs = 10

            [benchmarks.custom]
            USD = "UUP"
            Bonds = "BND"
            "#,
        );

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.analysis.risk_free_rate, 0.015);
        assert_eq!(config.analysis.start_date.to_string(), "2019-03-01");
        assert_eq!(config.analysis.interval, Interval::Weekly);
        assert_eq!(config.api.base_url, "https://api.tradier.com/v1");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.benchmarks.custom.len(), 2);
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let file = write_toml("[analysis]\nstart_date = \"2018-01-02\"\n");

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.analysis.risk_free_rate, 0.002);
        assert_eq!(config.analysis.interval, Interval::Daily);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.benchmarks.custom.is_empty());
    }

    #[test]
    fn malformed_start_date_fails_to_load() {
        let file = write_toml("[analysis]\nstart_date = \"01/02/2018\"\n");
        assert!(matches!(load_config_from(file.path()), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config_from(&missing).is_err());
    }
}
