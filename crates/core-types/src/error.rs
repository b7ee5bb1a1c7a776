use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Price series for {0} is not in chronological order at {1}")]
    Unordered(String, chrono::NaiveDate),
}
