use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::ApiConfig;
use core_types::{Interval, PriceSeries};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{HistoryResponse, parse_history};

/// The abstract interface for a price-history source.
///
/// The analyzer only ever talks to this trait, so the HTTP implementation can
/// be swapped for an in-memory one in tests.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetches the bars of `symbol` from `start` until today, oldest first.
    async fn fetch_history(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
    ) -> Result<PriceSeries, ApiError>;
}

/// A concrete implementation of the `PriceHistoryProvider` for the Tradier markets API.
#[derive(Clone)]
pub struct TradierClient {
    client: reqwest::Client,
    base_url: String,
}

impl TradierClient {
    pub fn new(api_config: &ApiConfig, token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Configuration(format!("invalid API token: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn history_url(&self) -> String {
        format!("{}/markets/history", self.base_url)
    }
}

#[async_trait]
impl PriceHistoryProvider for TradierClient {
    async fn fetch_history(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let start = start.format("%Y-%m-%d").to_string();
        tracing::debug!(%symbol, %interval, %start, "Requesting price history.");

        let response = self
            .client
            .get(self.history_url())
            .query(&[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let series = parse_history(symbol, &text)?;
        tracing::debug!(%symbol, bars = series.len(), "Price history received.");
        Ok(series)
    }
}
