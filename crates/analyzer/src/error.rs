use analytics::AnalyticsError;
use api_client::error::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Failed to retrieve price history for {symbol}: {source}")]
    PrimaryRetrieval {
        symbol: String,
        #[source]
        source: ApiError,
    },

    #[error("Price history for {symbol} cannot be analyzed: {source}")]
    PrimaryMalformed {
        symbol: String,
        #[source]
        source: AnalyticsError,
    },

    #[error("No benchmarks left to rank: every benchmark was excluded or failed")]
    EmptyInput,

    #[error("Benchmark '{0}' has a beta but no alpha")]
    MissingAlpha(String),
}
