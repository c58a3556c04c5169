//! TickerSnap Core — two-stage extract-transform-load pipeline.
//!
//! Stage 1 (roster): fetch the S&P 500 reference page, locate the company
//! table, and clean it into typed ticker/name records.
//!
//! Stage 2 (prices): for each roster ticker, fetch a trailing quarter of
//! daily closing prices. One ticker's failure never aborts the others.
//!
//! Both stages print their table and persist it as UTF-8-with-BOM CSV.

pub mod export;
pub mod pipeline;
pub mod prices;
pub mod roster;
