//! Stage 1 — roster extraction.
//!
//! Fetches the reference page, locates the company table, and cleans it
//! into typed [`RosterRecord`]s. Every failure in this stage is fatal for
//! the whole run: no roster means Stage 2 has nothing to iterate.

pub mod page;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use page::{extract_table, RawTable};

/// One row of the cleaned company roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub ticker: String,
    pub company_name: String,
}

/// Where the roster comes from and which columns to keep.
///
/// All of this is fixed configuration passed down explicitly — there is no
/// process-wide state. `sp500_wikipedia_es()` carries the defaults.
#[derive(Debug, Clone)]
pub struct RosterSource {
    pub url: String,
    pub user_agent: String,
    /// Source header of the column projected into `ticker`.
    pub symbol_column: String,
    /// Source header of the column projected into `company_name`.
    pub name_column: String,
}

impl RosterSource {
    /// The S&P 500 annex on the Spanish Wikipedia.
    pub fn sp500_wikipedia_es() -> Self {
        Self {
            url: "https://es.wikipedia.org/wiki/Anexo:Compa%C3%B1%C3%ADas_del_S%26P_500".into(),
            // A plain browser UA — Wikipedia rejects default library agents.
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
            symbol_column: "Símbolo".into(),
            name_column: "Seguridad".into(),
        }
    }
}

/// Fatal errors for the roster stage.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster page request failed: {0}")]
    Network(String),

    #[error("roster page returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("no sortable wikitable found on the roster page")]
    TableNotFound,

    #[error("roster table has no '{0}' column")]
    ColumnNotFound(String),

    #[error("row {row} has {found} cells, header has {expected}")]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Fetch the roster page as HTML.
///
/// One synchronous GET, no retry. A transport failure or a non-2xx status
/// aborts the run.
pub fn fetch_page(source: &RosterSource) -> Result<String, RosterError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(source.user_agent.as_str())
        .build()
        .map_err(|e| RosterError::Network(e.to_string()))?;

    let resp = client
        .get(&source.url)
        .send()
        .map_err(|e| RosterError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(RosterError::HttpStatus {
            status: status.as_u16(),
        });
    }

    resp.text().map_err(|e| RosterError::Network(e.to_string()))
}

/// Project the two configured columns out of a raw table, rename them to
/// `ticker` / `company_name`, and drop rows where either value is missing.
///
/// Order-preserving, and idempotent on its own output.
pub fn clean_roster(
    table: &RawTable,
    source: &RosterSource,
) -> Result<Vec<RosterRecord>, RosterError> {
    let symbol_idx = table
        .column_index(&source.symbol_column)
        .ok_or_else(|| RosterError::ColumnNotFound(source.symbol_column.clone()))?;
    let name_idx = table
        .column_index(&source.name_column)
        .ok_or_else(|| RosterError::ColumnNotFound(source.name_column.clone()))?;

    let records = table
        .rows
        .iter()
        .filter_map(|row| {
            let ticker = row[symbol_idx].trim();
            let company_name = row[name_idx].trim();
            if ticker.is_empty() || company_name.is_empty() {
                return None;
            }
            Some(RosterRecord {
                ticker: ticker.to_string(),
                company_name: company_name.to_string(),
            })
        })
        .collect();

    Ok(records)
}

/// Fetch → locate → clean. The whole of Stage 1.
pub fn load_roster(source: &RosterSource) -> Result<Vec<RosterRecord>, RosterError> {
    let html = fetch_page(source)?;
    let table = page::extract_table(&html)?;
    clean_roster(&table, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn source() -> RosterSource {
        RosterSource::sp500_wikipedia_es()
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn projects_and_renames_the_two_columns() {
        let t = table(
            &["Símbolo", "Seguridad", "GICS Sector"],
            &[&["AAPL", "Apple Inc.", "Information Technology"]],
        );
        let records = clean_roster(&t, &source()).unwrap();
        assert_eq!(
            records,
            vec![RosterRecord {
                ticker: "AAPL".into(),
                company_name: "Apple Inc.".into(),
            }]
        );
    }

    #[test]
    fn drops_rows_with_missing_values() {
        let t = table(
            &["Símbolo", "Seguridad"],
            &[
                &["AAPL", "Apple Inc."],
                &["", "Ghost Corp"],
                &["MSFT", ""],
                &["   ", "Blank Symbol Inc."],
                &["GOOGL", "Alphabet Inc."],
            ],
        );
        let records = clean_roster(&t, &source()).unwrap();
        let tickers: Vec<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["AAPL", "GOOGL"]);
    }

    #[test]
    fn preserves_row_order() {
        let t = table(
            &["Símbolo", "Seguridad"],
            &[&["ZTS", "Zoetis"], &["AAPL", "Apple Inc."], &["MMM", "3M"]],
        );
        let records = clean_roster(&t, &source()).unwrap();
        let tickers: Vec<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, ["ZTS", "AAPL", "MMM"]);
    }

    #[test]
    fn missing_symbol_column_is_an_error() {
        let t = table(&["Ticker", "Seguridad"], &[&["AAPL", "Apple Inc."]]);
        match clean_roster(&t, &source()) {
            Err(RosterError::ColumnNotFound(col)) => assert_eq!(col, "Símbolo"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let t = table(&["Símbolo", "Nombre"], &[&["AAPL", "Apple Inc."]]);
        match clean_roster(&t, &source()) {
            Err(RosterError::ColumnNotFound(col)) => assert_eq!(col, "Seguridad"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn cleaning_is_idempotent() {
        let t = table(
            &["Símbolo", "Seguridad"],
            &[&["AAPL", "Apple Inc."], &["", ""], &["BRK.B", "Berkshire"]],
        );
        let first = clean_roster(&t, &source()).unwrap();

        // Rebuild a raw table from the cleaned output and clean again.
        let roundtrip = RawTable {
            headers: vec!["Símbolo".into(), "Seguridad".into()],
            rows: first
                .iter()
                .map(|r| vec![r.ticker.clone(), r.company_name.clone()])
                .collect(),
        };
        let second = clean_roster(&roundtrip, &source()).unwrap();
        assert_eq!(first, second);
    }

    proptest! {
        /// No row with a missing required field survives cleaning, and
        /// re-cleaning the output is a fixed point.
        #[test]
        fn cleaned_rows_have_no_empty_fields(
            rows in proptest::collection::vec(
                (r"[ A-Za-z0-9\.]{0,6}", r"[ A-Za-z0-9\.]{0,20}"),
                0..40,
            )
        ) {
            let raw = RawTable {
                headers: vec!["Símbolo".into(), "Seguridad".into()],
                rows: rows.iter().map(|(s, n)| vec![s.clone(), n.clone()]).collect(),
            };
            let cleaned = clean_roster(&raw, &source()).unwrap();

            for rec in &cleaned {
                prop_assert!(!rec.ticker.trim().is_empty());
                prop_assert!(!rec.company_name.trim().is_empty());
            }

            let roundtrip = RawTable {
                headers: raw.headers.clone(),
                rows: cleaned
                    .iter()
                    .map(|r| vec![r.ticker.clone(), r.company_name.clone()])
                    .collect(),
            };
            let recleaned = clean_roster(&roundtrip, &source()).unwrap();
            prop_assert_eq!(cleaned, recleaned);
        }
    }
}
