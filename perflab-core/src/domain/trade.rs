//! TradeRecord: one executed fill from the backtest's trade log.

use chrono::{DateTime, Utc};
use super::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of an executed trade.
///
/// Only the exact upper-case strings `"BUY"` and `"SELL"` map to
/// [`TradeSide::Buy`] and [`TradeSide::Sell`]. Anything else (including
/// `"buy"` and the empty string) is kept verbatim so it counts toward
/// neither side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeSide {
    Buy,
    Sell,
    Other(String),
}

impl TradeSide {
    pub fn as_str(&self) -> &str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
            TradeSide::Other(s) => s,
        }
    }
}

impl Default for TradeSide {
    fn default() -> Self {
        TradeSide::Other(String::new())
    }
}

impl From<&str> for TradeSide {
    fn from(s: &str) -> Self {
        match s {
            "BUY" => TradeSide::Buy,
            "SELL" => TradeSide::Sell,
            other => TradeSide::Other(other.to_string()),
        }
    }
}

impl From<String> for TradeSide {
    fn from(s: String) -> Self {
        match s.as_str() {
            "BUY" => TradeSide::Buy,
            "SELL" => TradeSide::Sell,
            _ => TradeSide::Other(s),
        }
    }
}

impl From<TradeSide> for String {
    fn from(side: TradeSide) -> Self {
        match side {
            TradeSide::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single executed trade.
///
/// Every field has a zero/empty default; a trade record is never rejected
/// for missing data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub symbol: Symbol,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub fee: f64,
    /// Notional value of the trade, excluding fees.
    pub value: f64,
}
