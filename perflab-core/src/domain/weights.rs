//! Portfolio weight snapshots (symbol -> fraction of total value).

use chrono::{DateTime, Utc};
use super::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allocation weights recorded at one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsPoint {
    pub timestamp: DateTime<Utc>,
    pub weights: BTreeMap<Symbol, f64>,
}

impl WeightsPoint {
    /// Sum of all weights. Close to 1.0 when the snapshot includes cash.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }
}
