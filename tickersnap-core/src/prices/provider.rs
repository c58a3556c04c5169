//! Price provider trait, per-ticker errors, and progress reporting.
//!
//! The provider trait abstracts the market-data source so tests can swap in
//! a mock. Everything here is recoverable: a [`FetchError`] costs one ticker
//! its rows, never the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One raw provider row: a trading day and its closing price.
///
/// The provider response carries no ticker column; the collector stamps the
/// ticker on during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Per-ticker fetch errors. Recovered locally — the ticker is skipped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("no price data for {symbol} in the requested window")]
    NoData { symbol: String },
}

/// A source of daily closing prices.
pub trait PriceProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily closes for one symbol over `[start, end]`.
    ///
    /// Fully independent per symbol: one call, no retry, best effort.
    fn fetch_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ClosingBar>, FetchError>;
}

/// Progress callback for the per-ticker fetch loop.
pub trait FetchProgress {
    /// Called when starting to fetch a ticker.
    fn on_start(&self, ticker: &str, index: usize, total: usize);

    /// Called when a ticker fetch completes. `Ok` carries the row count.
    fn on_complete(&self, ticker: &str, index: usize, total: usize, result: &Result<usize, FetchError>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Progress reporter that prints to stdout — one diagnostic per failure.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, ticker: &str, index: usize, total: usize) {
        println!("[{}/{}] Fetching {ticker}...", index + 1, total);
    }

    fn on_complete(
        &self,
        ticker: &str,
        _index: usize,
        _total: usize,
        result: &Result<usize, FetchError>,
    ) {
        match result {
            Ok(rows) => println!("  OK: {ticker} ({rows} rows)"),
            Err(e) => println!("  FAIL: {ticker}: {e}"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        println!("\nPrice collection complete: {succeeded}/{total} succeeded, {failed} failed");
    }
}
