//! ValueSeries: the portfolio mark-to-market curve, one point per snapshot.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single portfolio valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Portfolio value over time, in snapshot order.
///
/// The series is immutable once built. Metric code only reads it and derives
/// new sequences (returns, drawdowns) from [`ValueSeries::values`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSeries {
    points: Vec<ValuePoint>,
}

impl ValueSeries {
    /// Wrap points as supplied. No re-sorting is performed.
    pub fn new(points: Vec<ValuePoint>) -> Self {
        Self { points }
    }

    /// Build a series with one point per calendar day starting at `start`.
    pub fn daily(start: NaiveDate, values: &[f64]) -> Self {
        let origin = start.and_time(chrono::NaiveTime::default()).and_utc();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| ValuePoint {
                timestamp: origin + Duration::days(i as i64),
                value,
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ValuePoint] {
        &self.points
    }

    /// Values in snapshot order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first(&self) -> Option<&ValuePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ValuePoint> {
        self.points.last()
    }

    /// True when timestamps are strictly increasing (so also unique).
    pub fn is_chronological(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    }
}
