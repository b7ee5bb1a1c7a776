use api_client::PriceHistoryProvider;
use api_client::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{Interval, PriceSeries};
use indicatif::{ProgressBar, ProgressStyle};

/// Wraps a provider and advances a progress bar as each download finishes.
pub struct ProgressProvider<'a, P: ?Sized> {
    inner: &'a P,
    bar: ProgressBar,
}

impl<'a, P: PriceHistoryProvider + ?Sized> ProgressProvider<'a, P> {
    pub fn new(inner: &'a P, total: u64) -> anyhow::Result<Self> {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Ok(Self { inner, bar })
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Benchmarks retrieved.");
    }
}

#[async_trait]
impl<P: PriceHistoryProvider + ?Sized> PriceHistoryProvider for ProgressProvider<'_, P> {
    async fn fetch_history(
        &self,
        symbol: &str,
        interval: Interval,
        start: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        let result = self.inner.fetch_history(symbol, interval, start).await;
        let status = if result.is_ok() { "done" } else { "failed" };
        self.bar.set_message(format!("{} {}", symbol, status));
        self.bar.inc(1);
        result
    }
}
