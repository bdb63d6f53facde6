//! Plain-text report for terminal output.

use std::fmt::Write as _;

use crate::report::{keys, MetricReport};
use perflab_core::domain::UNKNOWN_STRATEGY;

const RULE_WIDTH: usize = 60;

/// Renders a [`MetricReport`] as an aligned text summary.
///
/// Absent keys render as 0 (or "Unknown" for the strategy name), so partial
/// reports always print.
#[derive(Debug, Clone, Default)]
pub struct TextReport {
    /// Optional provenance line shown under the title.
    pub source: Option<String>,
}

impl TextReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(path: &str, hash: &str) -> Self {
        let short: String = hash.chars().take(12).collect();
        Self {
            source: Some(format!("{path} (blake3 {short})")),
        }
    }

    pub fn render(&self, report: &MetricReport) -> String {
        let num = |key: &str| report.get_f64(key).unwrap_or(0.0);
        let count = |key: &str| num(key) as i64;
        let rule = "=".repeat(RULE_WIDTH);

        let mut out = String::new();
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{:^width$}", "Backtest Performance Report", width = RULE_WIDTH);
        let _ = writeln!(out, "{rule}");
        if let Some(source) = &self.source {
            let _ = writeln!(out, "Source: {source}");
        }
        let _ = writeln!(
            out,
            "\nStrategy: {}",
            report.get_str(keys::STRATEGY_NAME).unwrap_or(UNKNOWN_STRATEGY)
        );

        let _ = writeln!(out, "\n--- Returns ---");
        line(&mut out, "Initial capital", money(num(keys::INITIAL_CAPITAL)));
        line(&mut out, "Final value", money(num(keys::FINAL_VALUE)));
        line(&mut out, "Total return", pct(num(keys::TOTAL_RETURN)));
        line(&mut out, "Annualized return", pct(num(keys::ANNUALIZED_RETURN)));
        line(&mut out, "CAGR", pct(num(keys::CAGR)));

        let _ = writeln!(out, "\n--- Risk ---");
        line(&mut out, "Volatility", pct(num(keys::VOLATILITY)));
        line(&mut out, "Max drawdown", pct(num(keys::MAX_DRAWDOWN)));
        line(
            &mut out,
            "Max drawdown duration",
            format!("{} periods", count(keys::MAX_DRAWDOWN_DURATION)),
        );
        line(&mut out, "VaR (95%)", pct(num(keys::VAR_95)));
        line(&mut out, "CVaR (95%)", pct(num(keys::CVAR_95)));

        let _ = writeln!(out, "\n--- Risk-adjusted ---");
        line(&mut out, "Sharpe ratio", format!("{:.3}", num(keys::SHARPE_RATIO)));
        line(&mut out, "Sortino ratio", format!("{:.3}", num(keys::SORTINO_RATIO)));
        line(&mut out, "Calmar ratio", format!("{:.3}", num(keys::CALMAR_RATIO)));

        let _ = writeln!(out, "\n--- Trades ---");
        line(&mut out, "Total trades", count(keys::TOTAL_TRADES).to_string());
        line(&mut out, "Buy trades", count(keys::BUY_TRADES).to_string());
        line(&mut out, "Sell trades", count(keys::SELL_TRADES).to_string());
        line(&mut out, "Total fees", money(num(keys::TOTAL_FEES)));
        line(&mut out, "Avg trade value", money(num(keys::AVG_TRADE_VALUE)));

        let _ = writeln!(out, "\n{rule}");
        out
    }
}

fn line(out: &mut String, label: &str, value: String) {
    let _ = writeln!(out, "  {:<24}{value}", format!("{label}:"));
}

fn pct(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Dollar amount with thousands separators: `$1,234,567.89`.
fn money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}
