//! Pipeline orchestration — Stage 1 then Stage 2, no hidden state.
//!
//! All configuration (source page, date window, output paths) travels in a
//! [`PipelineConfig`]. Stage 1 errors are fatal and stop the run before any
//! Stage 1 file is written; Stage 2 tolerates per-ticker failures.

use std::path::PathBuf;

use chrono::{Months, NaiveDate};
use thiserror::Error;

use crate::export::{self, ExportError};
use crate::prices::{self, CollectSummary, FetchError, FetchProgress, PriceProvider, PricePoint};
use crate::roster::{self, RosterError, RosterRecord, RosterSource};

/// Everything a run needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub roster: RosterSource,
    /// End of the price window (the run's "today").
    pub end_date: NaiveDate,
    /// Window length in calendar months. The trailing quarter is 3.
    pub window_months: u32,
    pub roster_out: PathBuf,
    pub prices_out: PathBuf,
}

impl PipelineConfig {
    pub fn new(end_date: NaiveDate) -> Self {
        Self {
            roster: RosterSource::sp500_wikipedia_es(),
            end_date,
            window_months: 3,
            roster_out: PathBuf::from("companies.csv"),
            prices_out: PathBuf::from("prices.csv"),
        }
    }

    /// Start of the price window: `end_date` minus the window, calendar
    /// months, end-of-month days clamped.
    pub fn start_date(&self) -> NaiveDate {
        self.end_date
            .checked_sub_months(Months::new(self.window_months))
            .expect("date window out of range")
    }
}

/// Fatal pipeline errors. Per-ticker price failures are not here — they are
/// carried in [`PipelineReport::failures`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a completed run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub roster: Vec<RosterRecord>,
    pub prices: Vec<PricePoint>,
    /// Tickers that were skipped, with their causes.
    pub failures: Vec<(String, FetchError)>,
}

/// Run the whole pipeline: fetch the roster page, then hand off to
/// [`run_with_page`].
pub fn run(
    config: &PipelineConfig,
    provider: &dyn PriceProvider,
    progress: &dyn FetchProgress,
) -> Result<PipelineReport, PipelineError> {
    let html = roster::fetch_page(&config.roster)?;
    run_with_page(config, &html, provider, progress)
}

/// Run both stages against an already-fetched roster page.
///
/// This is the seam below the network: everything from here down is
/// deterministic given the page and the provider.
pub fn run_with_page(
    config: &PipelineConfig,
    html: &str,
    provider: &dyn PriceProvider,
    progress: &dyn FetchProgress,
) -> Result<PipelineReport, PipelineError> {
    // Stage 1: locate, clean, print, persist. Any error here aborts the run
    // before the roster file exists.
    let table = roster::extract_table(html)?;
    let cleaned = roster::clean_roster(&table, &config.roster)?;

    print_roster(&cleaned);
    export::write_roster_csv(&config.roster_out, &cleaned)?;

    // Stage 2: per-ticker collection over the trailing window.
    let tickers: Vec<String> = cleaned.iter().map(|r| r.ticker.clone()).collect();
    let summary = prices::collect_history(
        provider,
        &tickers,
        config.start_date(),
        config.end_date,
        progress,
    );

    if !tickers.is_empty() && summary.succeeded == 0 {
        println!(
            "warning: every price fetch failed ({} tickers); the price file will be header-only",
            summary.failed
        );
    }

    print_prices(&summary.points);
    export::write_prices_csv(&config.prices_out, &summary.points)?;

    let CollectSummary {
        points, errors, ..
    } = summary;

    Ok(PipelineReport {
        roster: cleaned,
        prices: points,
        failures: errors,
    })
}

fn print_roster(roster: &[RosterRecord]) {
    println!("Cleaned company roster:");
    println!("{:<8} {}", "Ticker", "Company");
    println!("{}", "-".repeat(40));
    for rec in roster {
        println!("{:<8} {}", rec.ticker, rec.company_name);
    }
    println!("{} companies\n", roster.len());
}

fn print_prices(points: &[PricePoint]) {
    println!("Cleaned closing prices:");
    println!("{:<12} {:<8} {:>12}", "Date", "Ticker", "Close");
    println!("{}", "-".repeat(34));
    for point in points {
        println!(
            "{:<12} {:<8} {:>12.2}",
            point.date, point.ticker, point.close
        );
    }
    println!("{} rows\n", points.len());
}
