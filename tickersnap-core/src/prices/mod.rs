//! Stage 2 — price history collection.
//!
//! Consumes the roster's ticker column and fetches a daily close series per
//! ticker. Failures are contained to the ticker that raised them.

pub mod collect;
pub mod provider;
pub mod yahoo;

pub use collect::{collect_history, CollectSummary};
pub use provider::{ClosingBar, FetchError, FetchProgress, PriceProvider, StdoutProgress};
pub use yahoo::YahooProvider;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the aggregated price history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub ticker: String,
    pub close: f64,
}
