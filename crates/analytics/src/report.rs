use serde::{Deserialize, Serialize};

/// Daily fractional returns of one instrument plus its whole-window return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnProfile {
    /// `returns[i] = close[i+1] / close[i] - 1`, one fewer element than the closes.
    pub returns: Vec<f64>,
    /// `last_close / first_close - 1`.
    pub total_return: f64,
    pub first_close: f64,
    pub last_close: f64,
}

/// The CAPM decomposition of one instrument against one benchmark.
///
/// Produced by the `CapmEstimator`; one per benchmark that survived retrieval
/// and estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapmResult {
    /// `Cov(instrument, benchmark) / Var(benchmark)`.
    pub beta: f64,
    /// Annualized excess return not explained by the benchmark exposure.
    pub alpha: f64,
    pub annualized_instrument_return: f64,
    pub annualized_benchmark_return: f64,
}
