//! Analysis configuration loaded from TOML.
//!
//! ```toml
//! [metrics]
//! risk_free_rate = 0.02
//! ```
//!
//! Every section is optional; missing values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::{MetricsEngine, DEFAULT_RISK_FREE_RATE};

/// Errors from loading or validating an analysis config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level analysis configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// `[metrics]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Annual risk-free rate as a fraction (0.02 = 2%).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

impl AnalysisConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.metrics.risk_free_rate.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "metrics.risk_free_rate must be finite, got {}",
                self.metrics.risk_free_rate
            )));
        }
        Ok(())
    }

    /// Replace the risk-free rate when `rate` is given.
    pub fn with_risk_free_rate(mut self, rate: Option<f64>) -> Result<Self, ConfigError> {
        if let Some(rate) = rate {
            self.metrics.risk_free_rate = rate;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn engine(&self) -> MetricsEngine {
        MetricsEngine::new(self.metrics.risk_free_rate)
    }
}
