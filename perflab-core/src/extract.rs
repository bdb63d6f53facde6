//! Series extraction: raw result records to typed series, ledger and summary.
//!
//! Extraction is best-effort and never fails:
//! - a snapshot is kept if and only if its timestamp parses ([`parse_timestamp`]);
//!   everything else about it falls back to a default
//! - a trade is always kept; missing or mistyped fields become zero/empty
//! - snapshot order is preserved exactly as supplied (no re-sorting)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::{Summary, TradeRecord, TradeSide, ValuePoint, ValueSeries, WeightsPoint};
use crate::schema::{RawResult, RawSnapshot, RawTrade};

/// Offset-bearing layouts tried after RFC 3339. Covers minute precision,
/// space separators and compact `+hhmm` offsets.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Naive date-time layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Everything the metric pipeline needs from one result file.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub series: ValueSeries,
    pub ledger: Vec<TradeRecord>,
    pub summary: Summary,
}

/// Converts a [`RawResult`] into canonical analysis inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesExtractor;

impl SeriesExtractor {
    pub fn extract(&self, raw: &RawResult) -> Extracted {
        Extracted {
            series: extract_value_series(raw),
            ledger: extract_trade_ledger(raw),
            summary: extract_summary(raw),
        }
    }
}

/// Parse an ISO-8601 instant.
///
/// A trailing `Z` means UTC. Times may carry seconds (with an optional
/// fraction), minutes only, or hours only, separated from the date by `T` or a
/// space, with an optional `+hh:mm` / `+hhmm` offset. A bare `YYYY-MM-DD` date
/// is midnight. Forms without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = normalize_iso(trimmed);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::default()).and_utc())
}

/// Rewrite a trailing `Z` as `+00:00` and widen an hour-only time (`THH`,
/// optionally followed by an offset) to `THH:00`.
fn normalize_iso(s: &str) -> String {
    let mut out = match s.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };

    let has_time_separator = matches!(out.as_bytes().get(10), Some(b'T' | b' '));
    let hour_only = has_time_separator
        && out
            .get(11..)
            .map_or(false, |time| time.find(['+', '-']).unwrap_or(time.len()) == 2);
    if hour_only {
        out.insert_str(13, ":00");
    }
    out
}

/// Portfolio value series from the snapshots whose timestamp parses.
pub fn extract_value_series(raw: &RawResult) -> ValueSeries {
    let points: Vec<ValuePoint> = raw.snapshots.iter().filter_map(snapshot_point).collect();

    let dropped = raw.snapshots.len() - points.len();
    if dropped > 0 {
        tracing::debug!(
            dropped,
            kept = points.len(),
            "skipped snapshots without a parsable timestamp"
        );
    }

    let series = ValueSeries::new(points);
    if !series.is_chronological() {
        tracing::warn!(
            points = series.len(),
            "snapshot timestamps are not strictly increasing; keeping supplied order"
        );
    }
    series
}

/// Trade ledger in input order, one record per raw trade.
pub fn extract_trade_ledger(raw: &RawResult) -> Vec<TradeRecord> {
    raw.trades.iter().map(trade_record).collect()
}

/// Summary pass-through fields. A non-string name is treated as absent;
/// capital and final value accept numbers or numeric strings.
pub fn extract_summary(raw: &RawResult) -> Summary {
    Summary {
        strategy_name: raw.summary.strategy_name.as_str().map(str::to_string),
        initial_capital: numeric(&raw.summary.initial_capital),
        final_value: numeric(&raw.summary.final_value),
    }
}

/// Allocation history from snapshots with a parsable timestamp and a
/// non-empty weights map. Non-numeric weights are skipped.
pub fn extract_weights_history(raw: &RawResult) -> Vec<WeightsPoint> {
    raw.snapshots
        .iter()
        .filter_map(|snap| {
            let timestamp = snap.timestamp.as_str().and_then(parse_timestamp)?;
            let weights: BTreeMap<String, f64> = snap
                .weights
                .as_object()?
                .iter()
                .filter_map(|(symbol, w)| numeric(w).map(|w| (symbol.clone(), w)))
                .collect();
            if weights.is_empty() {
                return None;
            }
            Some(WeightsPoint { timestamp, weights })
        })
        .collect()
}

// ─── Field resolution ───────────────────────────────────────────────

fn snapshot_point(snap: &RawSnapshot) -> Option<ValuePoint> {
    let timestamp = snap.timestamp.as_str().and_then(parse_timestamp)?;
    Some(ValuePoint {
        timestamp,
        value: numeric(&snap.total_value).unwrap_or(0.0),
    })
}

fn trade_record(raw: &RawTrade) -> TradeRecord {
    TradeRecord {
        timestamp: raw.timestamp.as_str().and_then(parse_timestamp),
        symbol: raw.symbol.as_str().unwrap_or_default().to_string(),
        side: raw
            .side
            .as_str()
            .map(TradeSide::from)
            .unwrap_or_default(),
        quantity: numeric(&raw.quantity).unwrap_or(0.0),
        price: numeric(&raw.price).unwrap_or(0.0),
        fee: numeric(&raw.fee).unwrap_or(0.0),
        value: numeric(&raw.value).unwrap_or(0.0),
    }
}

/// A JSON number, or a string holding one.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
