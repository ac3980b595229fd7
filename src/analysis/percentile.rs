//! Bootstrap percentile interval of the difference series.

use statrs::statistics::Statistics;

use super::t_interval::check_alpha;
use crate::error::StatsError;
use crate::result::{ConfidenceInterval, IntervalMethod};
use crate::statistics::compute_percentiles;

/// Interval spanned by the `alpha/2` and `1 - alpha/2` quantiles of the
/// bootstrap differences, centred on their mean.
///
/// # Errors
///
/// `InvalidAlpha` outside (0, 1); `Empty` if there are no differences.
pub fn percentile_interval(differences: &[f64], alpha: f64) -> Result<ConfidenceInterval, StatsError> {
    check_alpha(alpha)?;
    if differences.is_empty() {
        return Err(StatsError::Empty {
            series: "differences".to_string(),
        });
    }

    let bounds = compute_percentiles(differences, &[alpha / 2.0, 1.0 - alpha / 2.0]);

    Ok(ConfidenceInterval {
        method: IntervalMethod::Percentile,
        alpha,
        lower: bounds[0],
        upper: bounds[1],
        delta: differences.iter().mean(),
        critical_value: None,
        degrees_of_freedom: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_bounds() {
        let diffs: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
        let ci = percentile_interval(&diffs, 0.1).unwrap();

        assert!((ci.lower - 0.5).abs() < 1e-9);
        assert!((ci.upper - 9.5).abs() < 1e-9);
        assert!((ci.delta - 5.0).abs() < 1e-9);
        assert!(ci.is_significant());
    }

    #[test]
    fn test_straddling_zero_not_significant() {
        let diffs: Vec<f64> = (-50..=50).map(|i| i as f64 / 10.0).collect();
        let ci = percentile_interval(&diffs, 0.05).unwrap();
        assert!(!ci.is_significant());
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            percentile_interval(&[], 0.05),
            Err(StatsError::Empty { .. })
        ));
    }
}
