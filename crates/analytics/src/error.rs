use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Return series lengths differ: instrument has {instrument}, benchmark has {benchmark}")]
    LengthMismatch { instrument: usize, benchmark: usize },

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}
