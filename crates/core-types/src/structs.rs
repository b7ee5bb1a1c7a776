use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single daily (or weekly/monthly) OHLC record for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// The price history of one instrument over the analysis window, oldest bar first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series, rejecting bars that are not in strictly ascending date order.
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(CoreError::Unordered(symbol, pair[1].date));
        }
        Ok(Self { symbol, bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// The closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Restricts both series to the dates they have in common.
    ///
    /// Used when a benchmark has a shorter (or gappier) trading history than
    /// the instrument, so that return `i` of one series refers to the same
    /// trading days as return `i` of the other.
    pub fn align_with(&self, other: &PriceSeries) -> (PriceSeries, PriceSeries) {
        let ours: HashSet<NaiveDate> = self.bars.iter().map(|b| b.date).collect();
        let theirs: HashSet<NaiveDate> = other.bars.iter().map(|b| b.date).collect();

        let keep = |series: &PriceSeries, dates: &HashSet<NaiveDate>| PriceSeries {
            symbol: series.symbol.clone(),
            bars: series
                .bars
                .iter()
                .filter(|b| dates.contains(&b.date))
                .copied()
                .collect(),
        };

        (keep(self, &theirs), keep(other, &ours))
    }
}
