//! Integration tests for extraction against a frozen engine export.

use perflab_core::{extract_weights_history, RawResult, SeriesExtractor, TradeSide};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_result.json")
}

fn load_fixture() -> RawResult {
    let bytes = std::fs::read(fixture_path()).unwrap();
    RawResult::from_slice(&bytes).unwrap()
}

#[test]
fn fixture_series_skips_undated_snapshot() {
    let raw = load_fixture();
    assert_eq!(raw.snapshots.len(), 9);

    let extracted = SeriesExtractor.extract(&raw);
    assert_eq!(extracted.series.len(), 8);
    assert!(extracted.series.is_chronological());
    assert!(!extracted.series.values().contains(&12_345.0));
    assert_eq!(extracted.series.first().unwrap().value, 100_000.0);
    assert_eq!(extracted.series.last().unwrap().value, 103_500.0);
}

#[test]
fn fixture_ledger_keeps_input_order() {
    let extracted = SeriesExtractor.extract(&load_fixture());
    let sides: Vec<&TradeSide> = extracted.ledger.iter().map(|t| &t.side).collect();
    assert_eq!(
        sides,
        vec![&TradeSide::Buy, &TradeSide::Buy, &TradeSide::Sell, &TradeSide::Buy]
    );
    let symbols: Vec<&str> = extracted.ledger.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["SPY", "TLT", "SPY", "TLT"]);
}

#[test]
fn fixture_summary_passes_through() {
    let extracted = SeriesExtractor.extract(&load_fixture());
    assert_eq!(extracted.summary.strategy_name(), "Threshold Rebalance (5%)");
    assert_eq!(extracted.summary.initial_capital(), 100_000.0);
    assert_eq!(extracted.summary.final_value(), 103_500.0);
}

#[test]
fn fixture_weights_history() {
    let history = extract_weights_history(&load_fixture());
    assert_eq!(history.len(), 8);
    for point in &history {
        assert!((point.total() - 1.0).abs() < 1e-9, "weights sum {}", point.total());
        assert!(point.weights.contains_key("SPY"));
    }
}
