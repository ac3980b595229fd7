//! Analysis result types and related structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::TableInfo;
use crate::statistics::{percentile_label, BootstrapDistribution, Summary};

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Shape and column summary of the input table.
    pub table_info: TableInfo,

    /// Height summary over all children.
    pub all_children: Summary,

    /// Height summary of female children.
    pub female_children: Summary,

    /// Height summary of male children.
    pub male_children: Summary,

    /// Summary of the per-replicate male-minus-female differences.
    pub differences: Summary,

    /// Raw bootstrap series.
    pub bootstrap: BootstrapDistribution,

    /// Pooled t interval of the male and female mean series.
    pub t_interval: ConfidenceInterval,

    /// Percentile interval of the differences.
    pub percentile_interval: ConfidenceInterval,

    /// Run metadata.
    pub metadata: Metadata,
}

/// How an interval was computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IntervalMethod {
    /// Equal-variance two-sample t interval.
    PooledT,
    /// Quantiles of the bootstrap differences.
    Percentile,
}

/// A confidence interval for the difference in mean height.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceInterval {
    /// Method that produced the interval.
    pub method: IntervalMethod,
    /// Significance level (0.05 for a 95% interval).
    pub alpha: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Point estimate of the difference.
    pub delta: f64,
    /// Student t critical value (t interval only).
    pub critical_value: Option<f64>,
    /// Pooled degrees of freedom (t interval only).
    pub degrees_of_freedom: Option<f64>,
}

impl ConfidenceInterval {
    /// True when the interval excludes zero.
    pub fn is_significant(&self) -> bool {
        0.0 < self.lower || 0.0 > self.upper
    }

    /// Confidence level as a label ("95%").
    pub fn confidence_label(&self) -> String {
        percentile_label(1.0 - self.alpha)
    }

    /// One-sentence verdict naming the interval and the point estimate.
    pub fn verdict(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (status, relation) = if self.is_significant() {
            ("statistically significant", "does not contain")
        } else {
            ("not statistically significant", "contains")
        };
        write!(
            f,
            "The difference is {}: the {} confidence interval ({:.3}, {:.3}) {} zero; \
             the estimated difference is {:.3}.",
            status,
            self.confidence_label(),
            self.lower,
            self.upper,
            relation,
            self.delta
        )
    }
}

/// Metadata about a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Input file, if the table was loaded from disk.
    pub input: Option<String>,
    /// Number of bootstrap replicates.
    pub replicates: usize,
    /// Resample size as a fraction of the table.
    pub fraction: f64,
    /// Significance level.
    pub alpha: f64,
    /// Seed the caller asked for (`None` means entropy).
    pub seed: Option<u64>,
    /// Local time the analysis started.
    pub started_at: chrono::DateTime<chrono::Local>,
    /// Local time the analysis finished.
    pub finished_at: chrono::DateTime<chrono::Local>,
    /// Wall-clock duration in seconds.
    pub runtime_secs: f64,
}
