//! Error types for the statistics, configuration and pipeline layers.
//!
//! Loader errors live in [`crate::data::DataError`]; everything here wraps
//! them into [`AnalysisError`] for the pipeline.

use std::fmt;

use crate::data::DataError;
use crate::types::Sex;

/// Numerical preconditions that would otherwise produce NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Statistic requested on an empty series.
    Empty {
        /// Name of the series.
        series: String,
    },

    /// A bootstrap resample contained no rows of one sex.
    EmptyStratum {
        /// Zero-based replicate index.
        replicate: usize,
        /// The missing category.
        sex: Sex,
    },

    /// Too few values for a sample variance.
    InsufficientSamples {
        /// Name of the series.
        series: String,
        /// Number of values found.
        got: usize,
        /// Minimum required.
        min: usize,
    },

    /// Significance level outside (0, 1).
    InvalidAlpha(f64),

    /// Resample fraction outside (0, 1].
    InvalidFraction(f64),

    /// The t distribution could not be constructed.
    Distribution(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Empty { series } => write!(f, "Series '{}' is empty", series),
            StatsError::EmptyStratum { replicate, sex } => write!(
                f,
                "Bootstrap replicate {} drew no {} rows; the mean is undefined",
                replicate,
                sex.noun()
            ),
            StatsError::InsufficientSamples { series, got, min } => write!(
                f,
                "Series '{}' has {} values, need at least {} for a sample variance",
                series, got, min
            ),
            StatsError::InvalidFraction(fraction) => {
                write!(f, "Resample fraction must be in (0, 1], got {}", fraction)
            }
            StatsError::InvalidAlpha(alpha) => {
                write!(f, "Significance level must be in (0, 1), got {}", alpha)
            }
            StatsError::Distribution(msg) => write!(f, "t distribution error: {}", msg),
        }
    }
}

impl std::error::Error for StatsError {}

/// An `AnalysisConfig` field outside its valid range.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Field name.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid configuration '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Any failure of the end-to-end analysis.
#[derive(Debug)]
pub enum AnalysisError {
    /// Loading or projecting the table failed.
    Data(DataError),
    /// A statistic could not be computed.
    Stats(StatsError),
    /// The configuration is invalid.
    Config(ConfigError),
    /// Writing a report artifact failed.
    Io(std::io::Error),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Data(e) => write!(f, "{}", e),
            AnalysisError::Stats(e) => write!(f, "{}", e),
            AnalysisError::Config(e) => write!(f, "{}", e),
            AnalysisError::Io(e) => write!(f, "IO error writing report: {}", e),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Data(e) => Some(e),
            AnalysisError::Stats(e) => Some(e),
            AnalysisError::Config(e) => Some(e),
            AnalysisError::Io(e) => Some(e),
        }
    }
}

impl From<DataError> for AnalysisError {
    fn from(e: DataError) -> Self {
        AnalysisError::Data(e)
    }
}

impl From<StatsError> for AnalysisError {
    fn from(e: StatsError) -> Self {
        AnalysisError::Stats(e)
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(e: ConfigError) -> Self {
        AnalysisError::Config(e)
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        AnalysisError::Io(e)
    }
}
