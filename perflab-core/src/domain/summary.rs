//! Backtest summary fields passed through to the final report.

use serde::{Deserialize, Serialize};

/// Strategy name reported when the result carries none.
pub const UNKNOWN_STRATEGY: &str = "Unknown";

/// Summary block of a backtest result.
///
/// Fields are `None` when the result omitted them; the accessors resolve
/// the report defaults (`"Unknown"`, `0`, `0`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub strategy_name: Option<String>,
    pub initial_capital: Option<f64>,
    pub final_value: Option<f64>,
}

impl Summary {
    pub fn strategy_name(&self) -> &str {
        self.strategy_name.as_deref().unwrap_or(UNKNOWN_STRATEGY)
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital.unwrap_or(0.0)
    }

    pub fn final_value(&self) -> f64 {
        self.final_value.unwrap_or(0.0)
    }
}
