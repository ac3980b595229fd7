//! Descriptive statistics for one numeric series.

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::quantile::compute_percentiles;
use crate::error::StatsError;

/// Count, mean, spread and percentiles of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1). `None` for a single value.
    pub std: Option<f64>,
    /// Smallest value.
    pub min: f64,
    /// `(probability, value)` pairs in the order requested.
    pub percentiles: Vec<(f64, f64)>,
    /// Largest value.
    pub max: f64,
}

/// Describe a series.
///
/// # Errors
///
/// Returns `StatsError::Empty` if `series` has no values.
pub fn describe(name: &str, series: &[f64], percentiles: &[f64]) -> Result<Summary, StatsError> {
    if series.is_empty() {
        return Err(StatsError::Empty {
            series: name.to_string(),
        });
    }

    let std = if series.len() > 1 {
        Some(series.iter().std_dev())
    } else {
        None
    };

    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let values = compute_percentiles(series, percentiles);

    Ok(Summary {
        count: series.len(),
        mean: series.iter().mean(),
        std,
        min,
        percentiles: percentiles.iter().copied().zip(values).collect(),
        max,
    })
}

/// Label a probability the way a percentile column is headed ("2.5%", "50%").
pub fn percentile_label(p: f64) -> String {
    let pct = p * 100.0;
    let text = format!("{:.3}", pct);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", text)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8}{:>12}", "count", self.count)?;
        writeln!(f, "{:<8}{:>12.3}", "mean", self.mean)?;
        match self.std {
            Some(std) => writeln!(f, "{:<8}{:>12.3}", "std", std)?,
            None => writeln!(f, "{:<8}{:>12}", "std", "n/a")?,
        }
        writeln!(f, "{:<8}{:>12.3}", "min", self.min)?;
        for &(p, value) in &self.percentiles {
            writeln!(f, "{:<8}{:>12.3}", percentile_label(p), value)?;
        }
        writeln!(f, "{:<8}{:>12.3}", "max", self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = describe("x", &data, &[0.5]).unwrap();

        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        // Sample variance = 32 / 7
        assert!((summary.std.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.percentiles, vec![(0.5, 4.5)]);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let summary = describe("x", &[66.0], &[0.25, 0.75]).unwrap();
        assert_eq!(summary.std, None);
        assert_eq!(summary.percentiles, vec![(0.25, 66.0), (0.75, 66.0)]);
        assert!(summary.to_string().contains("n/a"));
    }

    #[test]
    fn test_empty_is_error() {
        let err = describe("female heights", &[], &[0.5]).unwrap_err();
        assert_eq!(
            err,
            StatsError::Empty {
                series: "female heights".to_string()
            }
        );
    }

    #[test]
    fn test_percentile_label() {
        assert_eq!(percentile_label(0.025), "2.5%");
        assert_eq!(percentile_label(0.5), "50%");
        assert_eq!(percentile_label(0.975), "97.5%");
    }
}
