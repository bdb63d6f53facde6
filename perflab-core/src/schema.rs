//! Backtest result schema: the boundary between the backtest engine's JSON
//! export and the analysis pipeline.
//!
//! The engine writes PascalCase record fields (`Timestamp`, `TotalValue`, ...)
//! and a snake_case `summary` block. Record fields are kept as raw
//! [`serde_json::Value`]s here so one malformed field never rejects the whole
//! document; typing and defaulting happen once, in [`crate::extract`].
//!
//! Record keys are also accepted in snake_case. When a record carries both
//! spellings of a key, the non-null PascalCase value wins.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A complete backtest result file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub snapshots: Vec<RawSnapshot>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub trades: Vec<RawTrade>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: RawSummary,

    /// Engine configuration, carried through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
}

impl RawResult {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// One portfolio snapshot as exported. Cash and positions are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawSnapshot {
    #[serde(rename = "Timestamp")]
    pub timestamp: Value,

    #[serde(rename = "TotalValue")]
    pub total_value: Value,

    #[serde(rename = "Weights")]
    pub weights: Value,
}

impl From<Value> for RawSnapshot {
    fn from(record: Value) -> Self {
        Self {
            timestamp: field(&record, "Timestamp", "timestamp"),
            total_value: field(&record, "TotalValue", "total_value"),
            weights: field(&record, "Weights", "weights"),
        }
    }
}

/// One executed trade as exported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawTrade {
    #[serde(rename = "Timestamp")]
    pub timestamp: Value,

    #[serde(rename = "Symbol")]
    pub symbol: Value,

    #[serde(rename = "Side")]
    pub side: Value,

    #[serde(rename = "Quantity")]
    pub quantity: Value,

    #[serde(rename = "Price")]
    pub price: Value,

    #[serde(rename = "Fee")]
    pub fee: Value,

    #[serde(rename = "Value")]
    pub value: Value,
}

impl From<Value> for RawTrade {
    fn from(record: Value) -> Self {
        Self {
            timestamp: field(&record, "Timestamp", "timestamp"),
            symbol: field(&record, "Symbol", "symbol"),
            side: field(&record, "Side", "side"),
            quantity: field(&record, "Quantity", "quantity"),
            price: field(&record, "Price", "price"),
            fee: field(&record, "Fee", "fee"),
            value: field(&record, "Value", "value"),
        }
    }
}

/// Record field lookup. Non-object records yield `Null` for every field.
fn field(record: &Value, pascal: &str, snake: &str) -> Value {
    record
        .get(pascal)
        .filter(|v| !v.is_null())
        .or_else(|| record.get(snake))
        .cloned()
        .unwrap_or(Value::Null)
}

/// The `summary` block. Only the pass-through fields are named; the rest
/// (dates, engine-side totals) is retained in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSummary {
    #[serde(default)]
    pub strategy_name: Value,

    #[serde(default)]
    pub initial_capital: Value,

    #[serde(default)]
    pub final_value: Value,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Go encodes nil slices and maps as `null`; treat that like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_export() {
        let json = r#"{
            "summary": {
                "strategy_name": "Threshold Rebalance",
                "start_date": "2020-01-02T00:00:00Z",
                "initial_capital": 100000,
                "final_value": 112000.5,
                "total_trades": 2
            },
            "trades": [
                {"Timestamp": "2020-01-02T00:00:00Z", "Symbol": "SPY", "Side": "BUY",
                 "Quantity": 10, "Price": 320.5, "Fee": 1.6, "Value": 3205}
            ],
            "snapshots": [
                {"Timestamp": "2020-01-02T00:00:00Z", "Cash": 0, "Positions": null,
                 "TotalValue": 100000, "Weights": {"SPY": 0.6, "CASH": 0.4}}
            ],
            "config": {"InitialCapital": 100000}
        }"#;
        let raw = RawResult::from_json(json).unwrap();
        assert_eq!(raw.snapshots.len(), 1);
        assert_eq!(raw.trades.len(), 1);
        assert_eq!(raw.snapshots[0].total_value, 100000);
        assert_eq!(raw.trades[0].side, "BUY");
        assert_eq!(raw.summary.strategy_name, "Threshold Rebalance");
        assert!(raw.summary.extra.contains_key("total_trades"));
        assert!(raw.config.is_object());
    }

    #[test]
    fn null_collections_are_empty() {
        let raw = RawResult::from_json(r#"{"snapshots": null, "trades": null, "summary": null}"#)
            .unwrap();
        assert!(raw.snapshots.is_empty());
        assert!(raw.trades.is_empty());
        assert!(raw.summary.strategy_name.is_null());
    }

    #[test]
    fn missing_sections_are_empty() {
        let raw = RawResult::from_json("{}").unwrap();
        assert!(raw.snapshots.is_empty());
        assert!(raw.trades.is_empty());
        assert!(raw.config.is_null());
    }

    #[test]
    fn snake_case_aliases_accepted() {
        let raw = RawResult::from_json(
            r#"{"snapshots": [{"timestamp": "2024-01-02", "total_value": 5.0}]}"#,
        )
        .unwrap();
        assert_eq!(raw.snapshots[0].timestamp, "2024-01-02");
        assert_eq!(raw.snapshots[0].total_value, 5.0);
    }

    #[test]
    fn both_key_spellings_prefer_pascal_case() {
        let raw = RawResult::from_json(
            r#"{"snapshots": [
                {"Timestamp": "2024-01-02", "timestamp": "not a date", "TotalValue": 7.0},
                {"Timestamp": null, "timestamp": "2024-01-03", "total_value": 8.0}
            ],
            "trades": [{"Side": "BUY", "side": "SELL", "Value": 10}]}"#,
        )
        .unwrap();
        assert_eq!(raw.snapshots.len(), 2);
        assert_eq!(raw.snapshots[0].timestamp, "2024-01-02");
        assert_eq!(raw.snapshots[0].total_value, 7.0);
        assert_eq!(raw.snapshots[1].timestamp, "2024-01-03");
        assert_eq!(raw.snapshots[1].total_value, 8.0);
        assert_eq!(raw.trades[0].side, "BUY");
    }

    #[test]
    fn non_object_records_do_not_reject_file() {
        let raw = RawResult::from_json(
            r#"{"snapshots": [42, {"Timestamp": "2024-01-02", "TotalValue": 1.0}],
                "trades": ["junk"]}"#,
        )
        .unwrap();
        assert_eq!(raw.snapshots.len(), 2);
        assert!(raw.snapshots[0].timestamp.is_null());
        assert_eq!(raw.snapshots[1].total_value, 1.0);
        assert!(raw.trades[0].side.is_null());
    }

    #[test]
    fn records_serialize_pascal_case() {
        let snapshot = RawSnapshot::from(serde_json::json!({"timestamp": "2024-01-02"}));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["Timestamp"], "2024-01-02");
    }
}
