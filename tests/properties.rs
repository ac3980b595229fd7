//! Statistical properties of the resampler and the intervals.

use galton_bootstrap::analysis::{percentile_interval, pooled_t_interval};
use galton_bootstrap::statistics::{bootstrap_mean_difference, resample_size};
use galton_bootstrap::{GaltonAnalysis, Observation, Sex, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

fn synthetic_observations(n: usize, seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let male = Normal::new(69.2, 2.6).unwrap();
    let female = Normal::new(64.1, 2.4).unwrap();
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Observation::new(Sex::Male, rng.sample(male))
            } else {
                Observation::new(Sex::Female, rng.sample(female))
            }
        })
        .collect()
}

fn to_table(observations: &[Observation]) -> Table {
    let rows = observations
        .iter()
        .map(|o| vec![o.sex.label().to_string(), format!("{:.2}", o.height)])
        .collect();
    Table::new(vec!["child_sex".to_string(), "child_height".to_string()], rows)
}

// ===========================================================================
// Strata and resampling
// ===========================================================================

/// Female and male strata partition the table.
#[test]
fn strata_partition_the_table() {
    let table = to_table(&synthetic_observations(301, 1));
    let report = GaltonAnalysis::quick().seed(1).analyze_table(&table).unwrap();

    assert_eq!(
        report.female_children.count + report.male_children.count,
        report.all_children.count
    );
    assert_eq!(report.all_children.count, 301);
}

/// Every bootstrap series has one entry per replicate.
#[test]
fn vectors_have_one_entry_per_replicate() {
    let obs = synthetic_observations(100, 2);
    for replicates in [1, 2, 17, 250] {
        let mut rng = StdRng::seed_from_u64(replicates as u64);
        let dist = bootstrap_mean_difference(&obs, replicates, 1.0, &mut rng).unwrap();
        assert_eq!(dist.male_means.len(), replicates);
        assert_eq!(dist.female_means.len(), replicates);
        assert_eq!(dist.differences.len(), replicates);
    }
}

/// Each difference is the male mean minus the female mean of its replicate.
#[test]
fn differences_are_male_minus_female() {
    let obs = synthetic_observations(80, 3);
    let mut rng = StdRng::seed_from_u64(3);
    let dist = bootstrap_mean_difference(&obs, 50, 1.0, &mut rng).unwrap();

    for i in 0..50 {
        assert_eq!(dist.differences[i], dist.male_means[i] - dist.female_means[i]);
    }
}

/// At fraction 1 the resample is as large as the table.
#[test]
fn resample_size_matches_table() {
    assert_eq!(resample_size(934, 1.0), 934);
    assert_eq!(resample_size(934, 0.5), 467);

    let obs = synthetic_observations(64, 4);
    let mut rng = StdRng::seed_from_u64(4);
    let dist = bootstrap_mean_difference(&obs, 5, 1.0, &mut rng).unwrap();
    assert_eq!(dist.resample_size, 64);
}

/// Resampled means stay inside the range of their stratum.
#[test]
fn means_within_stratum_range() {
    let obs = synthetic_observations(120, 5);
    let range = |sex: Sex| {
        obs.iter()
            .filter(|o| o.sex == sex)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), o| {
                (lo.min(o.height), hi.max(o.height))
            })
    };
    let (male_lo, male_hi) = range(Sex::Male);
    let (female_lo, female_hi) = range(Sex::Female);

    let mut rng = StdRng::seed_from_u64(5);
    let dist = bootstrap_mean_difference(&obs, 100, 1.0, &mut rng).unwrap();
    assert!(dist.male_means.iter().all(|&m| m >= male_lo && m <= male_hi));
    assert!(dist.female_means.iter().all(|&f| f >= female_lo && f <= female_hi));
}

// ===========================================================================
// Intervals
// ===========================================================================

/// The t interval is symmetric about the point estimate.
#[test]
fn t_interval_symmetric() {
    let obs = synthetic_observations(200, 6);
    let mut rng = StdRng::seed_from_u64(6);
    let dist = bootstrap_mean_difference(&obs, 300, 1.0, &mut rng).unwrap();
    let ci = pooled_t_interval(&dist.male_means, &dist.female_means, 0.05).unwrap();

    let upper_half = ci.upper - ci.delta;
    let lower_half = ci.delta - ci.lower;
    assert!((upper_half - lower_half).abs() < 1e-9);
    assert!(ci.lower <= ci.upper);
}

/// Identical constant series are not significantly different.
#[test]
fn constant_equal_series_not_significant() {
    let a = vec![66.0; 50];
    let ci = pooled_t_interval(&a, &a, 0.05).unwrap();
    assert_eq!(ci.delta, 0.0);
    assert!(!ci.is_significant());
}

/// Widely separated, low-variance series are significant.
#[test]
fn separated_series_significant() {
    let mut rng = StdRng::seed_from_u64(7);
    let tight_high = Normal::new(69.0, 0.05).unwrap();
    let tight_low = Normal::new(64.0, 0.05).unwrap();
    let a: Vec<f64> = (0..100).map(|_| rng.sample(tight_high)).collect();
    let b: Vec<f64> = (0..100).map(|_| rng.sample(tight_low)).collect();

    let ci = pooled_t_interval(&a, &b, 0.05).unwrap();
    assert!(ci.is_significant());
    assert!((ci.delta - 5.0).abs() < 0.1);
}

/// A smaller alpha widens the interval.
#[test]
fn smaller_alpha_is_wider() {
    let obs = synthetic_observations(100, 8);
    let mut rng = StdRng::seed_from_u64(8);
    let dist = bootstrap_mean_difference(&obs, 200, 1.0, &mut rng).unwrap();

    let wide = pooled_t_interval(&dist.male_means, &dist.female_means, 0.01).unwrap();
    let narrow = pooled_t_interval(&dist.male_means, &dist.female_means, 0.10).unwrap();
    assert!(wide.upper - wide.lower > narrow.upper - narrow.lower);

    let wide = percentile_interval(&dist.differences, 0.01).unwrap();
    let narrow = percentile_interval(&dist.differences, 0.10).unwrap();
    assert!(wide.upper - wide.lower >= narrow.upper - narrow.lower);
}

/// Percentile bounds lie within the observed differences.
#[test]
fn percentile_interval_within_range() {
    let obs = synthetic_observations(150, 9);
    let mut rng = StdRng::seed_from_u64(9);
    let dist = bootstrap_mean_difference(&obs, 400, 1.0, &mut rng).unwrap();
    let ci = percentile_interval(&dist.differences, 0.05).unwrap();

    let lo = dist.differences.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = dist.differences.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(ci.lower >= lo && ci.upper <= hi);
    assert!(ci.is_significant());
}
