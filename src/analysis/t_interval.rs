//! Pooled two-sample t confidence interval.
//!
//! Under the equal-variance assumption the interval for the absolute
//! difference of means is
//!
//! ```text
//! delta ± t_{1-α/2, n1+n2-2} · sp · sqrt(1/n1 + 1/n2)
//! sp² = ((n1-1)·var1 + (n2-1)·var2) / (n1 + n2 - 2)
//! ```
//!
//! The interval is closed form; the only special function is the Student t
//! quantile, taken from `statrs`.

use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;

use crate::error::StatsError;
use crate::result::{ConfidenceInterval, IntervalMethod};

/// Minimum values per series for a sample variance.
const MIN_SERIES_LEN: usize = 2;

/// Two-sided Student t critical value: the `t` with `P(T > t) = alpha / 2`.
///
/// # Errors
///
/// `InvalidAlpha` outside (0, 1); `Distribution` if `df` is not positive.
pub fn t_critical(alpha: f64, df: f64) -> Result<f64, StatsError> {
    check_alpha(alpha)?;
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf(1.0 - alpha / 2.0))
}

pub(crate) fn check_alpha(alpha: f64) -> Result<(), StatsError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidAlpha(alpha))
    }
}

fn check_len(name: &str, series: &[f64]) -> Result<(), StatsError> {
    if series.len() < MIN_SERIES_LEN {
        return Err(StatsError::InsufficientSamples {
            series: name.to_string(),
            got: series.len(),
            min: MIN_SERIES_LEN,
        });
    }
    Ok(())
}

/// Confidence interval for `|mean(a) - mean(b)|` under a pooled t model.
///
/// The series may have different lengths.
///
/// # Errors
///
/// - `InvalidAlpha` if `alpha` is not in (0, 1).
/// - `InsufficientSamples` if either series has fewer than two values,
///   since its sample variance would be undefined.
pub fn pooled_t_interval(a: &[f64], b: &[f64], alpha: f64) -> Result<ConfidenceInterval, StatsError> {
    check_alpha(alpha)?;
    check_len("first series", a)?;
    check_len("second series", b)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (ave1, ave2) = (a.iter().mean(), b.iter().mean());
    let (var1, var2) = (a.iter().variance(), b.iter().variance());

    let delta = (ave1 - ave2).abs();
    let df = n1 + n2 - 2.0;
    let sp = (((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df).sqrt();
    let se = (1.0 / n1 + 1.0 / n2).sqrt();
    let t_c = t_critical(alpha, df)?;

    let half_width = t_c * sp * se;

    Ok(ConfidenceInterval {
        method: IntervalMethod::PooledT,
        alpha,
        lower: delta - half_width,
        upper: delta + half_width,
        delta,
        critical_value: Some(t_c),
        degrees_of_freedom: Some(df),
    })
}
