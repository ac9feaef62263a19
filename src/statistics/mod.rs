//! Statistics over benchmark timings.
//!
//! - Welford's online mean/variance for the live measurement loop
//! - Quantiles over recorded per-sample durations for offline analysis

mod online;
mod quantile;

pub use online::{RunningStats, StatsSnapshot};
pub use quantile::{compute_quantile, LatencyPercentiles};
