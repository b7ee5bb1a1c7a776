use crate::benchmarks::BenchmarkSet;
use crate::error::ConfigError;
use chrono::{NaiveDate, Utc};
use core_types::Interval;
use serde::Deserialize;

/// Environment variable holding the market-data API token when it is not set in the file.
pub const API_TOKEN_ENV: &str = "TRADIER_API_TOKEN";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub benchmarks: BenchmarkSettings,
}

/// Parameters shared by every alpha/beta computation in a run.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    /// The risk-free rate in decimal form (0.002 corresponds to 0.2%).
    pub risk_free_rate: f64,
    /// First day of the analysis window (format: YYYY-MM-DD).
    pub start_date: NaiveDate,
    /// Bar interval requested from the provider.
    #[serde(default)]
    pub interval: Interval,
}

/// Connection settings for the market-data API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the markets API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Bearer token. Falls back to `TRADIER_API_TOKEN` when absent.
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sandbox.tradier.com/v1".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl ApiConfig {
    /// Resolves the API token from the file first, then from the environment.
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        if let Some(token) = self.token.as_ref().filter(|t| !t.trim().is_empty()) {
            return Ok(token.clone());
        }
        std::env::var(API_TOKEN_ENV).map_err(|_| ConfigError::MissingEnvVar(API_TOKEN_ENV.to_string()))
    }
}

/// User-editable benchmark definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarkSettings {
    /// The "Custom" preset, label -> ticker. Empty means the built-in default.
    #[serde(default)]
    pub custom: BenchmarkSet,
}

impl Config {
    /// Checks the invariants the analytics rely on, using today's date.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at(Utc::now().date_naive())
    }

    /// Same as [`Config::validate`] with an explicit "today".
    pub fn validate_at(&self, today: NaiveDate) -> Result<(), ConfigError> {
        let rfr = self.analysis.risk_free_rate;
        if !rfr.is_finite() || rfr <= -1.0 || rfr >= 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "risk_free_rate must be a decimal fraction in (-1, 1), got {}",
                rfr
            )));
        }

        if self.analysis.start_date >= today {
            return Err(ConfigError::ValidationError(format!(
                "start_date {} must be before {}",
                self.analysis.start_date, today
            )));
        }

        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("api.base_url must not be empty".to_string()));
        }

        if let Some((label, _)) = self.benchmarks.custom.iter().find(|(_, ticker)| ticker.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "custom benchmark '{}' has an empty ticker",
                label
            )));
        }

        Ok(())
    }
}
