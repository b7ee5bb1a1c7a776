use crate::error::AnalyticsError;
use crate::report::{CapmResult, ReturnProfile};

/// Benchmark variances at or below this are treated as constant series.
pub const MIN_VARIANCE: f64 = 1e-15;

/// A stateless calculator for the CAPM decomposition of an instrument
/// against a benchmark.
///
/// The risk-free rate and the length of the window in years are fixed for a
/// run, so they live on the estimator and every benchmark shares them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapmEstimator {
    risk_free_rate: f64,
    years: f64,
}

impl CapmEstimator {
    pub fn new(risk_free_rate: f64, years: f64) -> Self {
        Self { risk_free_rate, years }
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn years(&self) -> f64 {
        self.years
    }

    /// Estimates beta and alpha of `instrument` relative to `benchmark`.
    ///
    /// Both profiles must cover the same trading days; align the underlying
    /// price series first when the histories differ.
    pub fn estimate(
        &self,
        instrument: &ReturnProfile,
        benchmark: &ReturnProfile,
    ) -> Result<CapmResult, AnalyticsError> {
        estimate(
            &instrument.returns,
            &benchmark.returns,
            instrument.total_return,
            benchmark.total_return,
            self.years,
            self.risk_free_rate,
        )
    }
}

/// Computes beta from the sample covariance matrix of the two return series
/// and alpha from the annualized total returns.
///
/// # Errors
///
/// * `LengthMismatch` if the series differ in length.
/// * `DegenerateInput` if `years` is not positive, fewer than two returns are
///   available, the benchmark has zero variance, or the result is not finite.
pub fn estimate(
    instrument_returns: &[f64],
    benchmark_returns: &[f64],
    instrument_total_return: f64,
    benchmark_total_return: f64,
    years: f64,
    risk_free_rate: f64,
) -> Result<CapmResult, AnalyticsError> {
    if !years.is_finite() || years <= 0.0 {
        return Err(AnalyticsError::DegenerateInput(format!(
            "annualization window must be positive, got {} years",
            years
        )));
    }

    if instrument_returns.len() != benchmark_returns.len() {
        return Err(AnalyticsError::LengthMismatch {
            instrument: instrument_returns.len(),
            benchmark: benchmark_returns.len(),
        });
    }

    let covariance = covariance_matrix(instrument_returns, benchmark_returns)?;
    let benchmark_variance = covariance[1][1];
    if !benchmark_variance.is_finite() || benchmark_variance <= MIN_VARIANCE {
        return Err(AnalyticsError::DegenerateInput(format!(
            "benchmark return variance is {}, beta is undefined",
            benchmark_variance
        )));
    }

    let beta = covariance[1][0] / benchmark_variance;
    let annualized_instrument_return = annualize(instrument_total_return, years);
    let annualized_benchmark_return = annualize(benchmark_total_return, years);
    let alpha = capm_alpha(
        annualized_instrument_return,
        annualized_benchmark_return,
        beta,
        risk_free_rate,
    );

    if !beta.is_finite() || !alpha.is_finite() {
        return Err(AnalyticsError::DegenerateInput(format!(
            "non-finite estimate (beta {}, alpha {})",
            beta, alpha
        )));
    }

    tracing::debug!(beta, alpha, annualized_instrument_return, annualized_benchmark_return, "CAPM estimate.");

    Ok(CapmResult {
        beta,
        alpha,
        annualized_instrument_return,
        annualized_benchmark_return,
    })
}

/// The 2x2 sample covariance matrix (divisor `n - 1`) of two equally long
/// series, with `x` as row/column 0 and `y` as row/column 1.
pub fn covariance_matrix(x: &[f64], y: &[f64]) -> Result<[[f64; 2]; 2], AnalyticsError> {
    let n = x.len().min(y.len());
    if n < 2 {
        return Err(AnalyticsError::DegenerateInput(format!(
            "sample covariance needs at least 2 returns, got {}",
            n
        )));
    }

    let nf = n as f64;
    let x_mean = x[..n].iter().sum::<f64>() / nf;
    let y_mean = y[..n].iter().sum::<f64>() / nf;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for (xi, yi) in x[..n].iter().zip(&y[..n]) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ss_xx += dx * dx;
        ss_xy += dx * dy;
        ss_yy += dy * dy;
    }

    let d = nf - 1.0;
    Ok([[ss_xx / d, ss_xy / d], [ss_xy / d, ss_yy / d]])
}

/// Scales a total-period return to an equivalent yearly rate.
pub fn annualize(total_return: f64, years: f64) -> f64 {
    (1.0 + total_return).powf(1.0 / years) - 1.0
}

/// `alpha = ann_instrument - rf - beta * (ann_benchmark - rf)`.
pub fn capm_alpha(
    annualized_instrument_return: f64,
    annualized_benchmark_return: f64,
    beta: f64,
    risk_free_rate: f64,
) -> f64 {
    annualized_instrument_return - risk_free_rate - beta * (annualized_benchmark_return - risk_free_rate)
}
