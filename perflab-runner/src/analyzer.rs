//! Analysis pipeline: raw result → extracted series → metrics → report.
//!
//! [`Analyzer`] owns one [`MetricsEngine`] and applies it to any number of
//! results. Multiple files are analyzed in parallel with rayon; the engine is
//! shared by reference, since every computation is a pure function of its
//! inputs.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use perflab_core::{Extracted, RawResult, SeriesExtractor};

use crate::data_loader::{load_result, LoadError};
use crate::metrics::MetricsEngine;
use crate::report::{MetricReport, ReportAggregator};

/// The report for one result file, with provenance.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub path: PathBuf,
    /// BLAKE3 hex digest of the file the report was computed from.
    pub source_hash: String,
    pub report: MetricReport,
}

/// Runs extraction, metrics and aggregation with one engine configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    engine: MetricsEngine,
    extractor: SeriesExtractor,
    aggregator: ReportAggregator,
}

impl Analyzer {
    pub fn new(engine: MetricsEngine) -> Self {
        Self {
            engine,
            extractor: SeriesExtractor,
            aggregator: ReportAggregator,
        }
    }

    pub fn engine(&self) -> &MetricsEngine {
        &self.engine
    }

    /// Full report for one raw result.
    pub fn analyze(&self, raw: &RawResult) -> MetricReport {
        self.analyze_extracted(&self.extractor.extract(raw))
    }

    /// Full report for an already-extracted result.
    pub fn analyze_extracted(&self, extracted: &Extracted) -> MetricReport {
        let metrics = self.engine.calculate_all(&extracted.series);
        let report = self
            .aggregator
            .aggregate(metrics.to_report(), &extracted.ledger, &extracted.summary);

        debug!(
            points = extracted.series.len(),
            trades = extracted.ledger.len(),
            keys = report.len(),
            "analysis complete"
        );
        report
    }

    /// Load and analyze one result file.
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisRun, LoadError> {
        let loaded = load_result(path)?;
        Ok(AnalysisRun {
            report: self.analyze(&loaded.raw),
            path: loaded.path,
            source_hash: loaded.source_hash,
        })
    }

    /// Analyze several files in parallel. Results keep the input order; one
    /// unreadable file does not affect the others.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> Vec<Result<AnalysisRun, LoadError>> {
        paths.par_iter().map(|path| self.analyze_file(path)).collect()
    }
}
