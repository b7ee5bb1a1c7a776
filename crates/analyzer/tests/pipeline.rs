use analyzer::error::AnalyzerError;
use analyzer::{Analyzer, DropReason};
use api_client::PriceHistoryProvider;
use api_client::error::ApiError;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use configuration::{AnalysisSettings, BenchmarkSet};
use core_types::{Interval, PriceBar, PriceSeries};
use std::collections::HashMap;

/// Serves canned closes, one bar per day starting at `day_offset` days after 2020-01-01.
#[derive(Default)]
struct StaticProvider {
    histories: HashMap<String, (i64, Vec<f64>)>,
}

impl StaticProvider {
    fn with(mut self, symbol: &str, closes: &[f64]) -> Self {
        self.histories.insert(symbol.to_string(), (0, closes.to_vec()));
        self
    }

    fn with_offset(mut self, symbol: &str, day_offset: i64, closes: &[f64]) -> Self {
        self.histories.insert(symbol.to_string(), (day_offset, closes.to_vec()));
        self
    }
}

#[async_trait]
impl PriceHistoryProvider for StaticProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        _interval: Interval,
        start: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let (offset, closes) = self
            .histories
            .get(symbol)
            .ok_or_else(|| ApiError::NoData(symbol.to_string()))?;

        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceBar {
                date: start + Duration::days(offset + i as i64),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
            })
            .collect();

        PriceSeries::new(symbol, bars).map_err(|e| ApiError::InvalidData(e.to_string()))
    }
}

fn settings() -> AnalysisSettings {
    AnalysisSettings {
        risk_free_rate: 0.002,
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        interval: Interval::Daily,
    }
}

fn benchmarks(pairs: &[(&str, &str)]) -> BenchmarkSet {
    pairs.iter().map(|(l, t)| (l.to_string(), t.to_string())).collect()
}

const STOCK: [f64; 7] = [100.0, 103.0, 101.0, 106.0, 104.0, 110.0, 112.0];
const MARKET: [f64; 7] = [300.0, 303.0, 301.5, 306.0, 304.0, 309.0, 311.0];
const HEDGE: [f64; 7] = [50.0, 49.0, 50.5, 48.0, 49.5, 47.0, 46.5];

#[tokio::test]
async fn primary_retrieval_failure_is_fatal() {
    let provider = StaticProvider::default().with("SPY", &MARKET);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let err = analyzer.load_instrument(&provider, "AAPL").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::PrimaryRetrieval { ref symbol, .. } if symbol == "AAPL"));
}

#[tokio::test]
async fn primary_with_single_bar_is_malformed() {
    let provider = StaticProvider::default().with("AAPL", &[100.0]);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let err = analyzer.load_instrument(&provider, "AAPL").await.unwrap_err();
    assert!(matches!(err, AnalyzerError::PrimaryMalformed { .. }));
}

#[tokio::test]
async fn summary_reports_instrument_prices() {
    let provider = StaticProvider::default().with("AAPL", &[100.0, 110.0, 121.0]);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let summary = analyzer.load_instrument(&provider, "AAPL").await.unwrap().summary();
    assert_eq!(summary.start_price, 100.0);
    assert_eq!(summary.end_price, 121.0);
    assert!((summary.total_return - 0.21).abs() < 1e-12);
    assert_eq!(summary.bars, 3);
}

#[tokio::test]
async fn failed_and_degenerate_benchmarks_are_dropped() {
    let provider = StaticProvider::default()
        .with("AAPL", &STOCK)
        .with("SPY", &MARKET)
        .with("SH", &HEDGE)
        .with("FLAT", &[50.0; 7]);
    let analyzer = Analyzer::new(&settings(), 0.5);

    let instrument = analyzer.load_instrument(&provider, "AAPL").await.unwrap();
    let set = benchmarks(&[
        ("SP500", "SPY"),
        ("Short", "SH"),
        ("Flat", "FLAT"),
        ("Missing", "NOPE"),
    ]);

    let comparison = analyzer.compare(&provider, &instrument, &set).await.unwrap();

    assert_eq!(comparison.ranked.labels, vec!["SP500", "Short"]);
    assert!(comparison.ranked.betas[0] > 0.0);
    assert!(comparison.ranked.betas[1] < 0.0);
    assert_eq!(comparison.colors.len(), 2);
    assert_eq!(comparison.results.len(), 2);

    assert_eq!(comparison.dropped.len(), 2);
    let flat = comparison.dropped.iter().find(|d| d.label == "Flat").unwrap();
    assert!(matches!(flat.reason, DropReason::Analysis(analytics::AnalyticsError::DegenerateInput(_))));
    let missing = comparison.dropped.iter().find(|d| d.label == "Missing").unwrap();
    assert!(matches!(missing.reason, DropReason::Retrieval(ApiError::NoData(_))));

    let e = comparison.ranked.extrema;
    assert!(e.min <= 0.0 && e.max >= 0.0);
}

#[tokio::test]
async fn malformed_benchmarks_are_dropped() {
    // ZERO has a non-positive close; LATE overlaps the instrument on a single day.
    let provider = StaticProvider::default()
        .with("AAPL", &STOCK)
        .with("SPY", &MARKET)
        .with("ZERO", &[10.0, 0.0, 12.0, 11.0, 13.0, 12.5, 14.0])
        .with_offset("LATE", 6, &[300.0]);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let instrument = analyzer.load_instrument(&provider, "AAPL").await.unwrap();
    let set = benchmarks(&[("SP500", "SPY"), ("Zero", "ZERO"), ("Late", "LATE")]);

    let comparison = analyzer.compare(&provider, &instrument, &set).await.unwrap();

    assert_eq!(comparison.ranked.labels, vec!["SP500"]);
    assert_eq!(comparison.dropped.len(), 2);
    for label in ["Zero", "Late"] {
        let dropped = comparison.dropped.iter().find(|d| d.label == label).unwrap();
        assert!(
            matches!(dropped.reason, DropReason::Analysis(analytics::AnalyticsError::MalformedInput(_))),
            "{} dropped for {}",
            label,
            dropped.reason
        );
    }
}

#[tokio::test]
async fn everything_dropped_is_empty_input() {
    let provider = StaticProvider::default()
        .with("AAPL", &STOCK)
        .with("FLAT", &[50.0; 7]);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let instrument = analyzer.load_instrument(&provider, "AAPL").await.unwrap();
    let set = benchmarks(&[("Flat", "FLAT"), ("Missing", "NOPE")]);

    let err = analyzer.compare(&provider, &instrument, &set).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::EmptyInput));
}

#[tokio::test]
async fn empty_benchmark_set_is_empty_input() {
    let provider = StaticProvider::default().with("AAPL", &STOCK);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let instrument = analyzer.load_instrument(&provider, "AAPL").await.unwrap();
    let err = analyzer.compare(&provider, &instrument, &BenchmarkSet::new()).await.unwrap_err();
    assert!(matches!(err, AnalyzerError::EmptyInput));
}

#[tokio::test]
async fn newer_benchmark_is_aligned_to_common_dates() {
    // The benchmark starts trading two days after the window opens.
    let provider = StaticProvider::default()
        .with("AAPL", &STOCK)
        .with_offset("NEW", 2, &MARKET[2..]);
    let analyzer = Analyzer::new(&settings(), 1.0);

    let instrument = analyzer.load_instrument(&provider, "AAPL").await.unwrap();
    let set = benchmarks(&[("Newcomer", "NEW")]);
    let comparison = analyzer.compare(&provider, &instrument, &set).await.unwrap();

    // Same as estimating the overlapping tails directly.
    let stock_tail = analytics::convert_to_percent_change(&STOCK[2..]).unwrap();
    let bench_tail = analytics::convert_to_percent_change(&MARKET[2..]).unwrap();
    let expected = analyzer.estimator().estimate(&stock_tail, &bench_tail).unwrap();

    assert_eq!(comparison.results["Newcomer"], expected);
}

#[tokio::test]
async fn identical_inputs_rank_identically() {
    let provider = StaticProvider::default()
        .with("AAPL", &STOCK)
        .with("SPY", &MARKET)
        .with("QQQ", &MARKET)
        .with("SH", &HEDGE);
    let analyzer = Analyzer::new(&settings(), 1.0);
    let instrument = analyzer.load_instrument(&provider, "AAPL").await.unwrap();
    let set = benchmarks(&[("SP500", "SPY"), ("NASDAQ", "QQQ"), ("Short", "SH")]);

    let first = analyzer.compare(&provider, &instrument, &set).await.unwrap();
    let second = analyzer.compare(&provider, &instrument, &set).await.unwrap();

    // Equal betas: descending label puts SP500 ahead of NASDAQ.
    assert_eq!(first.ranked.labels, vec!["SP500", "NASDAQ", "Short"]);
    assert_eq!(first.ranked, second.ranked);
    assert_eq!(first.colors, second.colors);
}
