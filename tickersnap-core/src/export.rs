//! CSV persistence for both stages.
//!
//! Output contract: UTF-8 with a byte-order marker (spreadsheet tools choke
//! on BOM-less UTF-8 CSV with accented company names), comma-separated,
//! header row always present, no index column. An empty table still gets
//! its header row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::prices::PricePoint;
use crate::roster::RosterRecord;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fatal export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn bom_writer(path: &Path) -> Result<csv::Writer<File>, ExportError> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    Ok(csv::Writer::from_writer(file))
}

/// Write the cleaned roster: `Ticker,Company`.
pub fn write_roster_csv(path: &Path, roster: &[RosterRecord]) -> Result<(), ExportError> {
    let mut wtr = bom_writer(path)?;
    wtr.write_record(["Ticker", "Company"])?;
    for rec in roster {
        wtr.write_record([&rec.ticker, &rec.company_name])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the aggregated price history: `Date,Ticker,Close`.
///
/// Dates are `YYYY-MM-DD`; closes keep full float precision.
pub fn write_prices_csv(path: &Path, points: &[PricePoint]) -> Result<(), ExportError> {
    let mut wtr = bom_writer(path)?;
    wtr.write_record(["Date", "Ticker", "Close"])?;
    for point in points {
        wtr.write_record([
            &point.date.to_string(),
            &point.ticker,
            &point.close.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
