//! File-based config loading.

use std::io::Write;

use perflab_runner::{AnalysisConfig, ConfigError, DEFAULT_RISK_FREE_RATE};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_rate_from_file() {
    let file = write_config("[metrics]\nrisk_free_rate = 0.035\n");
    let config = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(config.metrics.risk_free_rate, 0.035);
}

#[test]
fn empty_file_uses_default_rate() {
    let file = write_config("");
    let config = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(config.engine().risk_free_rate(), DEFAULT_RISK_FREE_RATE);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("perflab.toml");
    let err = AnalysisConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("perflab.toml"));
}

#[test]
fn malformed_toml_is_parse_error() {
    let file = write_config("[metrics\nrisk_free_rate = 0.02\n");
    let err = AnalysisConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn infinite_rate_is_rejected() {
    let file = write_config("[metrics]\nrisk_free_rate = inf\n");
    let err = AnalysisConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
