use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build the HTTP request: {0}")]
    RequestBuild(#[from] reqwest::Error),

    #[error("The API request returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("The API returned no price history for {0}")]
    NoData(String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("Invalid API configuration: {0}")]
    Configuration(String),
}
