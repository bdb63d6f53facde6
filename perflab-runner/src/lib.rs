//! PerfLab Runner: metrics engine, report aggregation, and analysis pipeline.
//!
//! This crate builds on `perflab-core` to provide:
//! - Return, risk, and risk-adjusted ratio metrics over a value series
//! - Drawdown path and tail risk (VaR / CVaR) helpers
//! - Trade-ledger aggregation into a flat metric report
//! - Result-file loading with BLAKE3 provenance
//! - TOML analysis configuration
//! - Text and JSON report rendering

pub mod analyzer;
pub mod config;
pub mod data_loader;
pub mod drawdown;
pub mod metrics;
pub mod report;
pub mod reporting;
pub mod tail_metrics;

pub use analyzer::{AnalysisRun, Analyzer};
pub use config::{AnalysisConfig, ConfigError, MetricsConfig};
pub use data_loader::{load_result, LoadError, LoadedResult};
pub use metrics::{
    MetricsEngine, PerformanceMetrics, RatioMetrics, ReturnMetrics, RiskMetrics,
    DEFAULT_RISK_FREE_RATE, TRADING_DAYS_PER_YEAR,
};
pub use report::{keys, MetricReport, MetricValue, ReportAggregator, TradeStats};
pub use reporting::{write_report_json, TextReport};
