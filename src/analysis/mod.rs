//! Hypothesis tests on the bootstrap output.
//!
//! 1. **Pooled t interval** ([`t_interval`]): closed-form interval for the
//!    difference between the male and female mean series
//! 2. **Percentile interval** ([`percentile`]): quantiles of the
//!    per-replicate differences

mod percentile;
mod t_interval;

pub use percentile::percentile_interval;
pub use t_interval::{pooled_t_interval, t_critical};
