//! Statistical building blocks.
//!
//! - Quantiles with R-7 linear interpolation
//! - Descriptive summaries (count, mean, std, min, percentiles, max)
//! - Joint bootstrap of the male and female mean heights

mod bootstrap;
mod descriptive;
mod quantile;

pub use bootstrap::{
    bootstrap_mean_difference, counter_rng_seed, resample_size, resample_with_replacement_into,
    BootstrapDistribution,
};
pub use descriptive::{describe, percentile_label, Summary};
pub use quantile::{compute_percentiles, compute_quantile_sorted};
