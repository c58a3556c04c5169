//! TickerSnap CLI — scrape the S&P 500 roster, then snapshot a trailing
//! quarter of daily closing prices per company.
//!
//! Exit behavior: a roster failure (network, missing table) exits non-zero
//! with a diagnostic and writes nothing. Per-ticker price failures are
//! printed and skipped; the run still exits zero.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tickersnap_core::pipeline::{self, PipelineConfig};
use tickersnap_core::prices::{StdoutProgress, YahooProvider};
use tickersnap_core::roster::RosterSource;

#[derive(Parser)]
#[command(
    name = "tickersnap",
    about = "Scrape the S&P 500 company roster and collect a trailing quarter of closing prices"
)]
struct Cli {
    /// End of the price window (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Window length in calendar months.
    #[arg(long, default_value_t = 3)]
    months: u32,

    /// Output CSV for the cleaned roster.
    #[arg(long, default_value = "companies.csv")]
    roster_out: PathBuf,

    /// Output CSV for the aggregated price history.
    #[arg(long, default_value = "prices.csv")]
    prices_out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let end_date = cli
        .end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --end date (expected YYYY-MM-DD)")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let config = PipelineConfig {
        roster: RosterSource::sp500_wikipedia_es(),
        end_date,
        window_months: cli.months,
        roster_out: cli.roster_out,
        prices_out: cli.prices_out,
    };

    let provider = YahooProvider::new();
    let report = pipeline::run(&config, &provider, &StdoutProgress)
        .context("pipeline failed")?;

    println!(
        "Wrote {} companies to {} and {} price rows to {}",
        report.roster.len(),
        config.roster_out.display(),
        report.prices.len(),
        config.prices_out.display()
    );
    if !report.failures.is_empty() {
        println!("{} ticker(s) were skipped; see diagnostics above", report.failures.len());
    }

    Ok(())
}
