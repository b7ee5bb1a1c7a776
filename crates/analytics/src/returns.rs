use crate::error::AnalyticsError;
use crate::report::ReturnProfile;

/// Converts chronological closing prices into daily fractional returns and
/// the total return over the whole window.
///
/// The first close contributes no return of its own, only the baseline for
/// the second. The total return is computed from the endpoints alone, so it
/// does not depend on intermediate prices.
///
/// # Errors
///
/// `MalformedInput` when fewer than two closes are given or any close is
/// zero, negative or not finite.
pub fn convert_to_percent_change(closes: &[f64]) -> Result<ReturnProfile, AnalyticsError> {
    if closes.len() < 2 {
        return Err(AnalyticsError::MalformedInput(format!(
            "need at least 2 closing prices, got {}",
            closes.len()
        )));
    }

    if let Some((i, close)) = closes
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_finite() || **c <= 0.0)
    {
        return Err(AnalyticsError::MalformedInput(format!(
            "close #{} is {}, expected a positive price",
            i, close
        )));
    }

    let returns = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();

    let first_close = closes[0];
    let last_close = closes[closes.len() - 1];

    Ok(ReturnProfile {
        returns,
        total_return: last_close / first_close - 1.0,
        first_close,
        last_close,
    })
}
