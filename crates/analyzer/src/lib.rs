use crate::color::{Rgb, colors_for_alphas};
use crate::error::AnalyzerError;
use crate::ranking::{RankedResult, rank};
use analytics::{AnalyticsError, CapmEstimator, CapmResult, ReturnProfile, convert_to_percent_change};
use api_client::PriceHistoryProvider;
use api_client::error::ApiError;
use chrono::NaiveDate;
use configuration::{AnalysisSettings, BenchmarkSet};
use core_types::{Interval, PriceSeries};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod color;
pub mod error;
pub mod ranking;

pub use color::{BETA_COLOR, color_for_alpha};
pub use ranking::Extrema;

/// The instrument's own price facts, reported before any benchmark work.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentSummary {
    pub symbol: String,
    pub start_price: f64,
    pub end_price: f64,
    pub total_return: f64,
    pub bars: usize,
}

/// The instrument's price history together with its derived returns.
#[derive(Debug, Clone)]
pub struct InstrumentData {
    pub series: PriceSeries,
    pub profile: ReturnProfile,
}

impl InstrumentData {
    pub fn summary(&self) -> InstrumentSummary {
        InstrumentSummary {
            symbol: self.series.symbol.clone(),
            start_price: self.profile.first_close,
            end_price: self.profile.last_close,
            total_return: self.profile.total_return,
            bars: self.series.len(),
        }
    }
}

/// Why a benchmark did not make it into the ranking.
#[derive(Error, Debug)]
pub enum DropReason {
    #[error("retrieval failed: {0}")]
    Retrieval(ApiError),

    #[error("analysis failed: {0}")]
    Analysis(AnalyticsError),
}

#[derive(Debug)]
pub struct DroppedBenchmark {
    pub label: String,
    pub ticker: String,
    pub reason: DropReason,
}

/// Everything the presentation layer needs, in presentation order.
#[derive(Debug)]
pub struct Comparison {
    pub ranked: RankedResult,
    pub colors: Vec<Rgb>,
    pub results: BTreeMap<String, CapmResult>,
    pub dropped: Vec<DroppedBenchmark>,
}

/// The main analysis engine for one session.
pub struct Analyzer {
    estimator: CapmEstimator,
    interval: Interval,
    start_date: NaiveDate,
}

impl Analyzer {
    /// `years` is the length of the analysis window, computed once per run.
    pub fn new(settings: &AnalysisSettings, years: f64) -> Self {
        Self {
            estimator: CapmEstimator::new(settings.risk_free_rate, years),
            interval: settings.interval,
            start_date: settings.start_date,
        }
    }

    pub fn estimator(&self) -> &CapmEstimator {
        &self.estimator
    }

    /// Fetches and converts the instrument's history. Any failure here is fatal.
    pub async fn load_instrument<P>(&self, provider: &P, symbol: &str) -> Result<InstrumentData, AnalyzerError>
    where
        P: PriceHistoryProvider + ?Sized,
    {
        let series = provider
            .fetch_history(symbol, self.interval, self.start_date)
            .await
            .map_err(|source| AnalyzerError::PrimaryRetrieval {
                symbol: symbol.to_string(),
                source,
            })?;

        let profile = convert_to_percent_change(&series.closes()).map_err(|source| {
            AnalyzerError::PrimaryMalformed {
                symbol: symbol.to_string(),
                source,
            }
        })?;

        tracing::info!(%symbol, bars = series.len(), total_return = profile.total_return, "Instrument history loaded.");
        Ok(InstrumentData { series, profile })
    }

    /// Fetches every benchmark concurrently, estimates alpha and beta against
    /// each one that succeeds, and ranks the survivors.
    ///
    /// Benchmarks that fail retrieval or estimation are dropped with a warning.
    /// Returns `EmptyInput` when none survive.
    pub async fn compare<P>(
        &self,
        provider: &P,
        instrument: &InstrumentData,
        benchmarks: &BenchmarkSet,
    ) -> Result<Comparison, AnalyzerError>
    where
        P: PriceHistoryProvider + ?Sized,
    {
        let fetches = benchmarks.iter().map(|(label, ticker)| async move {
            tracing::info!(%label, %ticker, "Retrieving benchmark data.");
            let result = provider.fetch_history(ticker, self.interval, self.start_date).await;
            (label, ticker, result)
        });
        let fetched = join_all(fetches).await;

        let mut results = BTreeMap::new();
        let mut dropped = Vec::new();

        for (label, ticker, result) in fetched {
            let outcome = match result {
                Ok(series) => self.estimate_against(instrument, &series).map_err(DropReason::Analysis),
                Err(e) => Err(DropReason::Retrieval(e)),
            };

            match outcome {
                Ok(capm) => {
                    tracing::debug!(%label, beta = capm.beta, alpha = capm.alpha, "Benchmark estimated.");
                    results.insert(label.clone(), capm);
                }
                Err(reason) => {
                    tracing::warn!(%label, %ticker, %reason, "Ignoring data for benchmark.");
                    dropped.push(DroppedBenchmark {
                        label: label.clone(),
                        ticker: ticker.clone(),
                        reason,
                    });
                }
            }
        }

        let betas: BTreeMap<String, f64> = results.iter().map(|(k, r)| (k.clone(), r.beta)).collect();
        let alphas: BTreeMap<String, f64> = results.iter().map(|(k, r)| (k.clone(), r.alpha)).collect();

        let ranked = rank(&betas, &alphas)?;
        let colors = colors_for_alphas(&ranked.alphas, &ranked.extrema);

        Ok(Comparison {
            ranked,
            colors,
            results,
            dropped,
        })
    }

    /// Aligns the two histories on common dates and runs the CAPM estimate.
    ///
    /// Returns over a shortened overlap are still annualized over the full
    /// analysis window, so a benchmark with a late first bar reports a lower
    /// annualized return than its actual rate.
    pub fn estimate_against(
        &self,
        instrument: &InstrumentData,
        benchmark: &PriceSeries,
    ) -> Result<CapmResult, AnalyticsError> {
        let (stock, bench) = instrument.series.align_with(benchmark);

        let stock_profile = if stock.len() == instrument.series.len() {
            instrument.profile.clone()
        } else {
            tracing::warn!(
                benchmark = %benchmark.symbol,
                instrument_bars = instrument.series.len(),
                benchmark_bars = benchmark.len(),
                common_bars = stock.len(),
                "Histories differ; using only the overlapping dates."
            );
            convert_to_percent_change(&stock.closes())?
        };
        let bench_profile = convert_to_percent_change(&bench.closes())?;

        self.estimator.estimate(&stock_profile, &bench_profile)
    }
}
