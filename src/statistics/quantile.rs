//! Quantile computation with R-7 linear interpolation.
//!
//! R-7 is the definition used by spreadsheet and dataframe `describe`
//! routines: the quantile at `p` sits at fractional index `(n - 1) * p`.

/// Quantile of data that is already sorted ascending.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn compute_quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");

    let n = sorted.len();
    let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let h_floor = h.floor() as usize;
    let h_frac = h - h.floor();

    if h_floor >= n - 1 {
        sorted[n - 1]
    } else if h_frac == 0.0 {
        sorted[h_floor]
    } else {
        sorted[h_floor] + h_frac * (sorted[h_floor + 1] - sorted[h_floor])
    }
}

/// Compute several quantiles at once, sorting a copy of the data once.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn compute_percentiles(data: &[f64], probabilities: &[f64]) -> Vec<f64> {
    assert!(!data.is_empty(), "Cannot compute percentiles of empty slice");

    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    probabilities
        .iter()
        .map(|&p| compute_quantile_sorted(&sorted, p))
        .collect()
}
