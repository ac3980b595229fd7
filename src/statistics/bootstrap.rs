//! Joint bootstrap of the male and female mean heights.
//!
//! Each replicate resamples the *whole* table with replacement, so the sex
//! ratio of a resample varies along with the heights. The male and female
//! means are then taken within that resample.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::types::{Observation, Sex};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Counter-based RNG seed generation using SplitMix64.
///
/// This is a stateless PRF that generates deterministic, well-distributed
/// seeds from a base seed and counter. Replicate `i` always gets the same
/// generator for a given base seed, independent of which thread runs it.
#[inline]
pub fn counter_rng_seed(base_seed: u64, counter: u64) -> u64 {
    // SplitMix64: see https://xoshiro.di.unimi.it/splitmix64.c
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Number of rows drawn per resample: `round(n * fraction)`, at least 1.
///
/// With `fraction = 1.0` this is exactly `n`.
pub fn resample_size(n: usize, fraction: f64) -> usize {
    if n == 0 {
        return 0;
    }
    ((n as f64 * fraction).round() as usize).max(1)
}

/// Fill `out` with rows drawn uniformly with replacement from `data`.
///
/// # Panics
///
/// Panics if `data` is empty and `out` is not.
pub fn resample_with_replacement_into<T: Copy, R: Rng>(data: &[T], rng: &mut R, out: &mut [T]) {
    if out.is_empty() {
        return;
    }
    assert!(!data.is_empty(), "Cannot resample from empty data");

    let n = data.len();
    for slot in out.iter_mut() {
        *slot = data[rng.random_range(0..n)];
    }
}

/// The three series produced by the bootstrap, in replicate order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapDistribution {
    /// Male mean height of each resample.
    pub male_means: Vec<f64>,
    /// Female mean height of each resample.
    pub female_means: Vec<f64>,
    /// `male_means[i] - female_means[i]`.
    pub differences: Vec<f64>,
    /// Rows drawn per resample.
    pub resample_size: usize,
    /// Base seed the per-replicate generators were derived from.
    pub base_seed: u64,
}

impl BootstrapDistribution {
    /// Number of replicates.
    pub fn replicates(&self) -> usize {
        self.differences.len()
    }
}

/// Mean height per sex within one resample.
fn stratum_means(resample: &[Observation], replicate: usize) -> Result<(f64, f64), StatsError> {
    let (mut male_sum, mut male_n) = (0.0, 0usize);
    let (mut female_sum, mut female_n) = (0.0, 0usize);

    for obs in resample {
        match obs.sex {
            Sex::Male => {
                male_sum += obs.height;
                male_n += 1;
            }
            Sex::Female => {
                female_sum += obs.height;
                female_n += 1;
            }
        }
    }

    if male_n == 0 {
        return Err(StatsError::EmptyStratum {
            replicate,
            sex: Sex::Male,
        });
    }
    if female_n == 0 {
        return Err(StatsError::EmptyStratum {
            replicate,
            sex: Sex::Female,
        });
    }

    Ok((male_sum / male_n as f64, female_sum / female_n as f64))
}

/// Run one replicate into a scratch buffer.
fn run_replicate(
    observations: &[Observation],
    base_seed: u64,
    replicate: usize,
    buffer: &mut [Observation],
) -> Result<(f64, f64), StatsError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(base_seed, replicate as u64));
    resample_with_replacement_into(observations, &mut rng, buffer);
    stratum_means(buffer, replicate)
}

/// Bootstrap the male-minus-female difference in mean height.
///
/// For each of `replicates` iterations a resample of
/// `resample_size(n, fraction)` rows is drawn with replacement from the whole
/// table, and the male mean, female mean and their difference are recorded.
///
/// One base seed is drawn from `rng`; replicate `i` uses a Xoshiro256++
/// generator seeded with `counter_rng_seed(base, i)`. Results are therefore
/// identical with and without the `parallel` feature.
///
/// # Errors
///
/// - `StatsError::Empty` if there are no observations.
/// - `StatsError::InvalidFraction` if `fraction` is not in (0, 1].
/// - `StatsError::EmptyStratum` if any resample has no rows of one sex.
pub fn bootstrap_mean_difference<R: Rng>(
    observations: &[Observation],
    replicates: usize,
    fraction: f64,
    rng: &mut R,
) -> Result<BootstrapDistribution, StatsError> {
    if observations.is_empty() {
        return Err(StatsError::Empty {
            series: "observations".to_string(),
        });
    }

    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(StatsError::InvalidFraction(fraction));
    }

    let size = resample_size(observations.len(), fraction);
    let base_seed: u64 = rng.random();
    tracing::debug!(
        "Bootstrap: {} replicates of {} rows (base seed {:#018x})",
        replicates,
        size,
        base_seed
    );

    #[cfg(feature = "parallel")]
    let means: Vec<(f64, f64)> = crate::thread_pool::install(|| {
        (0..replicates)
            .into_par_iter()
            .map_init(
                || vec![observations[0]; size],
                |buffer, i| run_replicate(observations, base_seed, i, buffer),
            )
            .collect::<Result<Vec<_>, _>>()
    })?;

    #[cfg(not(feature = "parallel"))]
    let means: Vec<(f64, f64)> = {
        let mut buffer = vec![observations[0]; size];
        (0..replicates)
            .map(|i| run_replicate(observations, base_seed, i, &mut buffer))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut male_means = Vec::with_capacity(replicates);
    let mut female_means = Vec::with_capacity(replicates);
    let mut differences = Vec::with_capacity(replicates);
    for (m, f) in means {
        male_means.push(m);
        female_means.push(f);
        differences.push(m - f);
    }

    Ok(BootstrapDistribution {
        male_means,
        female_means,
        differences,
        resample_size: size,
        base_seed,
    })
}
