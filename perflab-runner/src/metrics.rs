//! Performance metrics: pure functions that compute strategy statistics.
//!
//! Every metric is a pure function: portfolio values in, scalar out. The
//! [`MetricsEngine`] groups them into return, risk, and risk-adjusted ratio
//! metrics and holds the one configuration value, the annual risk-free rate.
//!
//! Conventions:
//! - returns are simple period-over-period returns between snapshots
//! - annualization uses 252 periods per year, counting snapshots rather than
//!   calendar days
//! - standard deviations are sample standard deviations (divide by n - 1)
//! - degenerate input (fewer than two snapshots, zero variance, zero drawdown)
//!   yields 0.0, never NaN or infinity

use serde::{Deserialize, Serialize};

use perflab_core::ValueSeries;

use crate::drawdown::{drawdown_series, max_drawdown, max_drawdown_duration};
use crate::report::{keys, MetricReport};
use crate::tail_metrics::{cvar_95, var_95};

/// Periods per year used for every annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate used when none is configured.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Standard deviations below this are treated as zero variance.
const ZERO_VARIANCE: f64 = 1e-15;

/// Total and annualized return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    /// Same value as `annualized_return`.
    pub cagr: f64,
}

/// Volatility, drawdown, and tail risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub volatility: f64,
    pub max_drawdown: f64,
    /// Longest underwater stretch, in snapshot periods.
    pub max_drawdown_duration: usize,
    pub var_95: f64,
    pub cvar_95: f64,
}

/// Risk-adjusted return ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioMetrics {
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
}

/// All three metric groups for one value series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub returns: ReturnMetrics,
    pub risk: RiskMetrics,
    pub ratios: RatioMetrics,
}

impl PerformanceMetrics {
    /// Flatten into report entries. The three groups have disjoint keys.
    pub fn to_report(&self) -> MetricReport {
        let mut report = MetricReport::new();
        report.insert_f64(keys::TOTAL_RETURN, self.returns.total_return);
        report.insert_f64(keys::ANNUALIZED_RETURN, self.returns.annualized_return);
        report.insert_f64(keys::CAGR, self.returns.cagr);

        report.insert_f64(keys::VOLATILITY, self.risk.volatility);
        report.insert_f64(keys::MAX_DRAWDOWN, self.risk.max_drawdown);
        report.insert_count(keys::MAX_DRAWDOWN_DURATION, self.risk.max_drawdown_duration);
        report.insert_f64(keys::VAR_95, self.risk.var_95);
        report.insert_f64(keys::CVAR_95, self.risk.cvar_95);

        report.insert_f64(keys::SHARPE_RATIO, self.ratios.sharpe_ratio);
        report.insert_f64(keys::SORTINO_RATIO, self.ratios.sortino_ratio);
        report.insert_f64(keys::CALMAR_RATIO, self.ratios.calmar_ratio);
        report
    }
}

/// Stateless metric calculator configured with an annual risk-free rate.
///
/// Safe to share by reference across threads; every call works only on its
/// arguments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsEngine {
    risk_free_rate: f64,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_FREE_RATE)
    }
}

impl MetricsEngine {
    pub fn new(risk_free_rate: f64) -> Self {
        Self { risk_free_rate }
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Compute all metric groups.
    pub fn calculate_all(&self, series: &ValueSeries) -> PerformanceMetrics {
        PerformanceMetrics {
            returns: self.calculate_returns(series),
            risk: self.calculate_risk(series),
            ratios: self.calculate_ratios(series),
        }
    }

    pub fn calculate_returns(&self, series: &ValueSeries) -> ReturnMetrics {
        let values = series.values();
        if values.len() < 2 {
            return ReturnMetrics::default();
        }
        let annualized = annualized_return(&values);
        ReturnMetrics {
            total_return: total_return(&values),
            annualized_return: annualized,
            cagr: annualized,
        }
    }

    pub fn calculate_risk(&self, series: &ValueSeries) -> RiskMetrics {
        let values = series.values();
        if values.len() < 2 {
            return RiskMetrics::default();
        }
        let returns = period_returns(&values);
        let drawdowns = drawdown_series(&values);
        let var = var_95(&returns);

        RiskMetrics {
            volatility: volatility(&returns),
            max_drawdown: max_drawdown(&values),
            max_drawdown_duration: max_drawdown_duration(&drawdowns),
            var_95: var,
            cvar_95: cvar_95(&returns, var),
        }
    }

    pub fn calculate_ratios(&self, series: &ValueSeries) -> RatioMetrics {
        let values = series.values();
        if values.len() < 2 {
            return RatioMetrics::default();
        }
        let returns = period_returns(&values);
        RatioMetrics {
            sharpe_ratio: sharpe_ratio(&returns, self.risk_free_rate),
            sortino_ratio: sortino_ratio(&returns, self.risk_free_rate),
            calmar_ratio: calmar_ratio(&values),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: last / first - 1.
///
/// Returns 0.0 for fewer than two points or a non-positive first value.
pub fn total_return(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let initial = values[0];
    let final_value = values[values.len() - 1];
    if initial <= 0.0 {
        return 0.0;
    }
    final_value / initial - 1.0
}

/// Annualized return (CAGR).
///
/// The holding period is `len / 252` years, where `len` counts snapshots.
pub fn annualized_return(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let years = values.len() as f64 / TRADING_DAYS_PER_YEAR;
    if years <= 0.0 {
        return 0.0;
    }
    (1.0 + total_return(values)).powf(1.0 / years) - 1.0
}

/// Annualized volatility: sample std of period returns * sqrt(252).
pub fn volatility(returns: &[f64]) -> f64 {
    std_dev(returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized Sharpe ratio.
///
/// Sharpe = mean(returns - rf/252) / std(returns) * sqrt(252). The denominator
/// is the std of the raw returns, not of the excess returns.
/// Returns 0.0 if the returns have zero variance.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    let std = std_dev(returns);
    if std < ZERO_VARIANCE {
        return 0.0;
    }
    (mean_excess_return(returns, risk_free_rate) / std) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized Sortino ratio.
///
/// Sortino = mean(returns - rf/252) / std(negative returns) * sqrt(252).
/// Returns 0.0 if there are no negative returns or they have zero variance.
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    if downside.is_empty() {
        return 0.0;
    }
    let downside_std = std_dev(&downside);
    if downside_std < ZERO_VARIANCE {
        return 0.0;
    }
    (mean_excess_return(returns, risk_free_rate) / downside_std) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Calmar ratio: annualized return / |max drawdown|.
///
/// Both inputs are recomputed from the values. Returns 0.0 without a drawdown.
pub fn calmar_ratio(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let dd = max_drawdown(values).abs();
    if dd <= 0.0 {
        return 0.0;
    }
    annualized_return(values) / dd
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Simple returns between consecutive values: v[i] / v[i-1] - 1.
///
/// The first point has no return, so the output has `len - 1` elements.
/// A period starting from a non-positive value has return 0.0.
pub fn period_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    values
        .windows(2)
        .map(|w| if w[0] > 0.0 { w[1] / w[0] - 1.0 } else { 0.0 })
        .collect()
}

fn mean_excess_return(returns: &[f64], risk_free_rate: f64) -> f64 {
    let period_rf = risk_free_rate / TRADING_DAYS_PER_YEAR;
    let excess: Vec<f64> = returns.iter().map(|r| r - period_rf).collect();
    mean_f64(&excess)
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation. 0.0 for fewer than two observations or when
/// every observation is identical.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    if values.iter().all(|&v| v == values[0]) {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
