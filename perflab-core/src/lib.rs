//! PerfLab Core: domain types, result schema, and series extraction.
//!
//! This crate is the leaf of the analysis pipeline:
//! - Domain types (value series, trade records, summary, allocation weights)
//! - The backtest result schema as exported by the engine
//! - Best-effort extraction from raw records into typed series and ledgers
//!
//! No statistics live here; see `perflab-runner` for the metrics engine.

pub mod domain;
pub mod extract;
pub mod schema;

pub use domain::{Summary, TradeRecord, TradeSide, ValuePoint, ValueSeries, WeightsPoint};
pub use extract::{
    extract_summary, extract_trade_ledger, extract_value_series, extract_weights_history,
    parse_timestamp, Extracted, SeriesExtractor,
};
pub use schema::{RawResult, RawSnapshot, RawSummary, RawTrade};
