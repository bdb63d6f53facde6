//! JSON export of metric reports.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::report::MetricReport;

/// Write the flat metric mapping as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_report_json(path: &Path, report: &MetricReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("Failed to serialize metric report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

/// Report file name for a result file: `<stem>.metrics.json`.
pub fn report_file_name(result_path: &Path) -> PathBuf {
    let stem = result_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "result".to_string());
    PathBuf::from(format!("{stem}.metrics.json"))
}
