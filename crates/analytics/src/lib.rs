//! # Alpha/Beta Analytics
//!
//! Pure calculations behind the benchmark comparison: price series to return
//! series, the length of the analysis window in years, and the CAPM beta and
//! alpha of an instrument against a benchmark.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no knowledge of where prices come from. Inputs
//!   are plain slices of closes or returns.
//! - **Stateless calculation:** `CapmEstimator` only holds the run-wide
//!   risk-free rate and window length, so estimates for different benchmarks
//!   are independent of one another.
//!
//! ## Public API
//!
//! - `convert_to_percent_change`: closes -> `ReturnProfile`.
//! - `duration_in_years` / `years_since` / `parse_start_date`: window length.
//! - `CapmEstimator`: returns -> `CapmResult`.
//! - `AnalyticsError`: the error type for all of the above.

pub mod capm;
pub mod duration;
pub mod error;
pub mod report;
pub mod returns;

pub use capm::{CapmEstimator, annualize, capm_alpha, covariance_matrix, estimate};
pub use duration::{duration_in_years, parse_start_date, years_since};
pub use error::AnalyticsError;
pub use report::{CapmResult, ReturnProfile};
pub use returns::convert_to_percent_change;
