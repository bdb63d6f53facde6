//! Report aggregation: flat metric-name → value mapping plus trade statistics.
//!
//! A [`MetricReport`] is the single output shape of an analysis. Consumers
//! must tolerate any key being absent: the trade keys only appear when the
//! ledger is non-empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use perflab_core::{Summary, TradeRecord, TradeSide};

use crate::metrics::PerformanceMetrics;

/// Report key names.
pub mod keys {
    pub const TOTAL_RETURN: &str = "total_return";
    pub const ANNUALIZED_RETURN: &str = "annualized_return";
    pub const CAGR: &str = "cagr";

    pub const VOLATILITY: &str = "volatility";
    pub const MAX_DRAWDOWN: &str = "max_drawdown";
    pub const MAX_DRAWDOWN_DURATION: &str = "max_drawdown_duration";
    pub const VAR_95: &str = "var_95";
    pub const CVAR_95: &str = "cvar_95";

    pub const SHARPE_RATIO: &str = "sharpe_ratio";
    pub const SORTINO_RATIO: &str = "sortino_ratio";
    pub const CALMAR_RATIO: &str = "calmar_ratio";

    pub const TOTAL_TRADES: &str = "total_trades";
    pub const TOTAL_FEES: &str = "total_fees";
    pub const BUY_TRADES: &str = "buy_trades";
    pub const SELL_TRADES: &str = "sell_trades";
    pub const AVG_TRADE_VALUE: &str = "avg_trade_value";

    pub const STRATEGY_NAME: &str = "strategy_name";
    pub const INITIAL_CAPITAL: &str = "initial_capital";
    pub const FINAL_VALUE: &str = "final_value";

    /// Keys produced by the metrics engine for every series.
    pub const PERFORMANCE: [&str; 11] = [
        TOTAL_RETURN,
        ANNUALIZED_RETURN,
        CAGR,
        VOLATILITY,
        MAX_DRAWDOWN,
        MAX_DRAWDOWN_DURATION,
        VAR_95,
        CVAR_95,
        SHARPE_RATIO,
        SORTINO_RATIO,
        CALMAR_RATIO,
    ];

    /// Keys present only when the trade ledger is non-empty.
    pub const TRADES: [&str; 5] = [
        TOTAL_TRADES,
        TOTAL_FEES,
        BUY_TRADES,
        SELL_TRADES,
        AVG_TRADE_VALUE,
    ];

    /// Keys copied from the run summary on every report.
    pub const SUMMARY: [&str; 3] = [STRATEGY_NAME, INITIAL_CAPITAL, FINAL_VALUE];
}

/// One report value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric view; integers widen to f64, text has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Int(i) => Some(*i as f64),
            MetricValue::Float(f) => Some(*f),
            MetricValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(i) => write!(f, "{i}"),
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Flat, key-sorted metric mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricReport {
    entries: BTreeMap<String, MetricValue>,
}

impl MetricReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetricValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn insert_f64(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, MetricValue::Float(value));
    }

    pub fn insert_count(&mut self, key: impl Into<String>, count: usize) {
        self.insert(key, MetricValue::Int(count as i64));
    }

    pub fn insert_text(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.insert(key, MetricValue::Text(text.into()));
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.entries.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(MetricValue::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetricValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` in; its entries win on key collisions.
    pub fn extend(&mut self, other: MetricReport) {
        self.entries.extend(other.entries);
    }
}

impl From<&PerformanceMetrics> for MetricReport {
    fn from(metrics: &PerformanceMetrics) -> Self {
        metrics.to_report()
    }
}

/// Aggregates over a non-empty trade ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub total_fees: f64,
    pub buy_trades: usize,
    pub sell_trades: usize,
    /// Mean notional over all trades, whatever their side.
    pub avg_trade_value: f64,
}

impl TradeStats {
    /// `None` for an empty ledger.
    pub fn from_ledger(ledger: &[TradeRecord]) -> Option<Self> {
        if ledger.is_empty() {
            return None;
        }
        let total_fees = ledger.iter().map(|t| t.fee).sum();
        let buy_trades = ledger.iter().filter(|t| t.side == TradeSide::Buy).count();
        let sell_trades = ledger.iter().filter(|t| t.side == TradeSide::Sell).count();
        let total_value: f64 = ledger.iter().map(|t| t.value).sum();

        Some(Self {
            total_trades: ledger.len(),
            total_fees,
            buy_trades,
            sell_trades,
            avg_trade_value: total_value / ledger.len() as f64,
        })
    }

    fn write_into(&self, report: &mut MetricReport) {
        report.insert_count(keys::TOTAL_TRADES, self.total_trades);
        report.insert_f64(keys::TOTAL_FEES, self.total_fees);
        report.insert_count(keys::BUY_TRADES, self.buy_trades);
        report.insert_count(keys::SELL_TRADES, self.sell_trades);
        report.insert_f64(keys::AVG_TRADE_VALUE, self.avg_trade_value);
    }
}

/// Merges engine output with ledger aggregates and the run summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator;

impl ReportAggregator {
    pub fn aggregate(
        &self,
        metrics: MetricReport,
        ledger: &[TradeRecord],
        summary: &Summary,
    ) -> MetricReport {
        let mut report = metrics;

        if let Some(stats) = TradeStats::from_ledger(ledger) {
            stats.write_into(&mut report);
        }

        report.insert_text(keys::STRATEGY_NAME, summary.strategy_name());
        report.insert_f64(keys::INITIAL_CAPITAL, summary.initial_capital());
        report.insert_f64(keys::FINAL_VALUE, summary.final_value());
        report
    }
}
