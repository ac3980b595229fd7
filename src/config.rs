//! Configuration for the height analysis.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fixed-range histogram layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramSpec {
    /// Left edge of the first bin.
    pub min: f64,
    /// Right edge of the last bin.
    pub max: f64,
    /// Bin width.
    pub width: f64,
}

impl HistogramSpec {
    /// Create a histogram layout.
    pub const fn new(min: f64, max: f64, width: f64) -> Self {
        Self { min, max, width }
    }

    /// Number of bins (the last one may be narrower than `width`).
    pub fn bins(&self) -> usize {
        // Tolerance keeps 2.5 / 0.05 at 50 bins despite rounding
        ((self.max - self.min) / self.width - 1e-9).ceil().max(1.0) as usize
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(ConfigError::new(
                field,
                format!("range ({}, {}) must be finite with min < max", self.min, self.max),
            ));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::new(
                field,
                format!("bin width must be positive, got {}", self.width),
            ));
        }
        Ok(())
    }
}

/// Configuration options for `GaltonAnalysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bootstrap replicates (default: 1,000). Must be at least 1.
    pub replicates: usize,

    /// Resample size as a fraction of the table (default: 1.0). Must be in (0, 1].
    pub fraction: f64,

    /// Significance level for both intervals (default: 0.05). Must be in (0, 1).
    pub alpha: f64,

    /// Percentiles reported by every summary and marked on the height
    /// histograms (default: 2.5%, 25%, 50%, 75%, 97.5%).
    pub percentiles: Vec<f64>,

    /// Optional deterministic seed for the resampler.
    pub seed: Option<u64>,

    /// Column holding the `M`/`F` label (default: `child_sex`).
    pub sex_column: String,

    /// Column holding the height in inches (default: `child_height`).
    pub height_column: String,

    /// Layout of the female and male height histograms.
    pub height_histogram: HistogramSpec,

    /// Layout of the bootstrap difference histogram.
    pub difference_histogram: HistogramSpec,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            replicates: 1_000,
            fraction: 1.0,
            alpha: 0.05,
            percentiles: vec![0.025, 0.25, 0.5, 0.75, 0.975],
            seed: None,
            sex_column: "child_sex".to_string(),
            height_column: "child_height".to_string(),
            height_histogram: HistogramSpec::new(55.0, 80.0, 1.0),
            difference_histogram: HistogramSpec::new(4.0, 6.5, 0.05),
        }
    }
}

impl AnalysisConfig {
    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.replicates < 1 {
            return Err(ConfigError::new("replicates", "must be at least 1"));
        }
        if !(self.fraction > 0.0 && self.fraction <= 1.0) {
            return Err(ConfigError::new(
                "fraction",
                format!("must be in (0, 1], got {}", self.fraction),
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::new(
                "alpha",
                format!("must be in (0, 1), got {}", self.alpha),
            ));
        }
        if let Some(&p) = self.percentiles.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(ConfigError::new(
                "percentiles",
                format!("each must be in [0, 1], got {}", p),
            ));
        }
        if self.sex_column.is_empty() {
            return Err(ConfigError::new("sex_column", "must not be empty"));
        }
        if self.height_column.is_empty() {
            return Err(ConfigError::new("height_column", "must not be empty"));
        }
        self.height_histogram.validate("height_histogram")?;
        self.difference_histogram.validate("difference_histogram")?;
        Ok(())
    }
}
