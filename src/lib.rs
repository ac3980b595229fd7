//! # galton-bootstrap
//!
//! Do boys grow taller than girls? Bootstrap analysis of Galton's family
//! height table.
//!
//! The pipeline loads the table, summarizes child heights overall and per
//! sex, draws joint bootstrap resamples of the whole table, and decides
//! whether the male-minus-female difference in mean height is
//! statistically significant with:
//! - a pooled two-sample t interval on the male and female mean series
//! - a percentile interval of the per-replicate differences
//!
//! The difference is significant when the interval excludes zero.
//!
//! ## Quick Start
//!
//! ```no_run
//! use galton_bootstrap::GaltonAnalysis;
//!
//! let report = GaltonAnalysis::new()
//!     .seed(42)
//!     .run("galton.csv", "out")
//!     .unwrap();
//!
//! println!("{}", report.t_interval.verdict());
//! ```
//!
//! `run` writes `galton.html` plus three SVG histograms into the output
//! directory. Use [`GaltonAnalysis::analyze_table`] for an in-memory table
//! without any file output.
//!
//! ## Features
//!
//! - `parallel` (default): run replicates on a rayon pool. Results are
//!   identical to a sequential run with the same seed.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod pipeline;
mod result;
mod thread_pool;
mod types;

// Functional modules
pub mod analysis;
pub mod data;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use config::{AnalysisConfig, HistogramSpec};
pub use data::{DataError, Table, TableInfo};
pub use error::{AnalysisError, ConfigError, StatsError};
pub use pipeline::{
    GaltonAnalysis, DIFFERENCE_HISTOGRAM_FILE, FEMALE_HISTOGRAM_FILE, MALE_HISTOGRAM_FILE,
    REPORT_FILE,
};
pub use result::{AnalysisReport, ConfidenceInterval, IntervalMethod, Metadata};
pub use statistics::{BootstrapDistribution, Summary};
pub use types::{Observation, Sex};

/// Analyze a CSV file with the default configuration, writing nothing.
///
/// # Errors
///
/// Any loader, configuration or statistics error; see [`AnalysisError`].
pub fn analyze(path: impl AsRef<std::path::Path>) -> Result<AnalysisReport, AnalysisError> {
    let table = data::load_csv(path.as_ref())?;
    let mut report = GaltonAnalysis::new().analyze_table(&table)?;
    report.metadata.input = Some(path.as_ref().display().to_string());
    Ok(report)
}
