use crate::error::AnalyticsError;
use chrono::{DateTime, NaiveDate, Utc};

/// Seconds in a 365-day year, the convention used for annualization.
pub const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_start_date(raw: &str) -> Result<NaiveDate, AnalyticsError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AnalyticsError::InvalidDate(raw.to_string()))
}

/// Elapsed years between midnight (UTC) of `start` and `now`.
///
/// Negative when `start` lies after `now`; the CAPM estimator rejects
/// non-positive durations.
pub fn duration_in_years(start: NaiveDate, now: DateTime<Utc>) -> f64 {
    let start = start.and_time(chrono::NaiveTime::MIN).and_utc();
    let elapsed = now.signed_duration_since(start);
    elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_YEAR
}

/// [`duration_in_years`] measured against the wall clock.
pub fn years_since(start: NaiveDate) -> f64 {
    duration_in_years(start, Utc::now())
}
