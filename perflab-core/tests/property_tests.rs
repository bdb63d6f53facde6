//! Property tests for extraction invariants.
//!
//! Uses proptest to verify:
//! 1. Snapshot filtering: output length equals the number of parsable timestamps
//! 2. Order preservation: kept values appear in input order
//! 3. Ledger fidelity: one trade record per raw trade, never dropped

use perflab_core::{extract_trade_ledger, extract_value_series, RawResult, RawSnapshot, RawTrade};
use proptest::prelude::*;
use serde_json::{json, Value};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = f64> {
    (1.0..1_000_000.0_f64).prop_map(|v| (v * 100.0).round() / 100.0)
}

/// Either a valid timestamp on `day`, or one of several malformed forms.
fn arb_timestamp(day: u32) -> impl Strategy<Value = (Value, bool)> {
    let valid = format!("2024-01-{:02}T00:00:00Z", (day % 28) + 1);
    prop_oneof![
        3 => Just((Value::String(valid), true)),
        1 => Just((Value::Null, false)),
        1 => Just((Value::String(String::new()), false)),
        1 => Just((Value::String("garbage".into()), false)),
        1 => Just((json!(12345), false)),
    ]
}

fn arb_snapshots() -> impl Strategy<Value = Vec<(Value, bool, f64)>> {
    prop::collection::vec((0u32..28).prop_flat_map(arb_timestamp), 0..40).prop_flat_map(|ts| {
        let n = ts.len();
        (Just(ts), prop::collection::vec(arb_value(), n)).prop_map(|(ts, vals)| {
            ts.into_iter()
                .zip(vals)
                .map(|((t, ok), v)| (t, ok, v))
                .collect()
        })
    })
}

fn build_raw(snaps: &[(Value, bool, f64)]) -> RawResult {
    RawResult {
        snapshots: snaps
            .iter()
            .map(|(t, _, v)| RawSnapshot {
                timestamp: t.clone(),
                total_value: json!(v),
                weights: Value::Null,
            })
            .collect(),
        ..RawResult::default()
    }
}

proptest! {
    /// Exactly the snapshots with a parsable timestamp survive.
    #[test]
    fn keeps_only_parsable_snapshots(snaps in arb_snapshots()) {
        let raw = build_raw(&snaps);
        let series = extract_value_series(&raw);
        let expected = snaps.iter().filter(|(_, ok, _)| *ok).count();
        prop_assert_eq!(series.len(), expected);
    }

    /// Kept values keep their relative input order.
    #[test]
    fn preserves_input_order(snaps in arb_snapshots()) {
        let raw = build_raw(&snaps);
        let series = extract_value_series(&raw);
        let expected: Vec<f64> = snaps.iter().filter(|(_, ok, _)| *ok).map(|(_, _, v)| *v).collect();
        prop_assert_eq!(series.values(), expected);
    }

    /// Every raw trade yields exactly one ledger record.
    #[test]
    fn ledger_never_drops_trades(
        sides in prop::collection::vec(prop_oneof![
            Just(json!("BUY")), Just(json!("SELL")), Just(json!("buy")), Just(Value::Null), Just(json!(1))
        ], 0..30)
    ) {
        let raw = RawResult {
            trades: sides
                .iter()
                .map(|s| RawTrade { side: s.clone(), ..RawTrade::default() })
                .collect(),
            ..RawResult::default()
        };
        let ledger = extract_trade_ledger(&raw);
        prop_assert_eq!(ledger.len(), sides.len());
    }
}
