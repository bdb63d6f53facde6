//! Result-file loading with provenance.
//!
//! Reads a backtest result JSON file, parses it into the raw schema, and
//! records a BLAKE3 hash of the exact bytes so a report can be traced back
//! to the file it was computed from.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use perflab_core::RawResult;

/// Errors from the result loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read result file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("result file '{}' is not a valid backtest result: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A parsed result file plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedResult {
    pub path: PathBuf,
    pub raw: RawResult,
    /// BLAKE3 hex digest of the file bytes.
    pub source_hash: String,
}

/// Read and parse a result file.
pub fn load_result(path: &Path) -> Result<LoadedResult, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(&bytes).to_hex().to_string();
    let raw = RawResult::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        hash = %source_hash,
        snapshots = raw.snapshots.len(),
        trades = raw.trades.len(),
        "loaded result file"
    );

    Ok(LoadedResult {
        path: path.to_path_buf(),
        raw,
        source_hash,
    })
}
