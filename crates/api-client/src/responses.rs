use crate::error::ApiError;
use chrono::NaiveDate;
use core_types::{PriceBar, PriceSeries};
use serde::Deserialize;

/// The body of a `GET /markets/history` response.
///
/// `history` is `null`, or the string `"null"`, when the symbol is unknown or
/// has no bars in the window.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub history: Option<HistoryField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryField {
    Body(HistoryBody),
    Placeholder(String),
}

impl HistoryField {
    pub fn into_body(self) -> Option<HistoryBody> {
        match self {
            HistoryField::Body(body) => Some(body),
            HistoryField::Placeholder(_) => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryBody {
    pub day: Option<OneOrMany<DayRecord>>,
}

/// The API collapses a one-element list into a bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// A single history record. Only `date` and `close` are guaranteed.
#[derive(Debug, Clone, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl From<DayRecord> for PriceBar {
    fn from(day: DayRecord) -> Self {
        PriceBar {
            date: day.date,
            open: day.open.unwrap_or(day.close),
            high: day.high.unwrap_or(day.close),
            low: day.low.unwrap_or(day.close),
            close: day.close,
        }
    }
}

impl HistoryResponse {
    /// Converts the response into a chronological price series for `symbol`.
    pub fn into_price_series(self, symbol: &str) -> Result<PriceSeries, ApiError> {
        let days = self
            .history
            .and_then(HistoryField::into_body)
            .and_then(|h| h.day)
            .map(OneOrMany::into_vec)
            .unwrap_or_default();

        if days.is_empty() {
            return Err(ApiError::NoData(symbol.to_string()));
        }

        let bars = days.into_iter().map(PriceBar::from).collect();
        PriceSeries::new(symbol, bars).map_err(|e| ApiError::InvalidData(e.to_string()))
    }
}

/// Decodes a raw JSON history body.
pub fn parse_history(symbol: &str, body: &str) -> Result<PriceSeries, ApiError> {
    let response: HistoryResponse = serde_json::from_str(body).map_err(|e| {
        ApiError::Deserialization(format!("{}. Original text: {}", e, truncate(body, 200)))
    })?;
    response.into_price_series(symbol)
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
