//! Collection loop — per-ticker fetches with failure isolation.

use chrono::NaiveDate;

use super::provider::{FetchError, FetchProgress, PriceProvider};
use super::PricePoint;

/// Fetch closes for every ticker, stamping each row with its ticker and
/// concatenating the results in roster order.
///
/// A failing ticker contributes zero rows and one `(ticker, error)` entry;
/// it never aborts the loop. Fetches run sequentially, so the aggregate is
/// ordered by roster position with dates ascending within each ticker.
pub fn collect_history(
    provider: &dyn PriceProvider,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
    progress: &dyn FetchProgress,
) -> CollectSummary {
    let total = tickers.len();
    let mut points = Vec::new();
    let mut succeeded = 0;
    let mut failed = 0;
    let mut errors: Vec<(String, FetchError)> = Vec::new();

    for (i, ticker) in tickers.iter().enumerate() {
        progress.on_start(ticker, i, total);

        match provider.fetch_closes(ticker, start, end) {
            Ok(bars) => {
                progress.on_complete(ticker, i, total, &Ok(bars.len()));
                points.extend(bars.into_iter().map(|bar| PricePoint {
                    date: bar.date,
                    ticker: ticker.clone(),
                    close: bar.close,
                }));
                succeeded += 1;
            }
            Err(e) => {
                let result: Result<usize, FetchError> = Err(e);
                progress.on_complete(ticker, i, total, &result);
                if let Err(e) = result {
                    errors.push((ticker.clone(), e));
                }
                failed += 1;
            }
        }
    }

    progress.on_batch_complete(succeeded, failed, total);

    CollectSummary {
        points,
        total,
        succeeded,
        failed,
        errors,
    }
}

/// Summary of a collection run.
#[derive(Debug)]
pub struct CollectSummary {
    /// Aggregated price rows, in roster order.
    pub points: Vec<PricePoint>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// One entry per failing ticker.
    pub errors: Vec<(String, FetchError)>,
}

impl CollectSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
