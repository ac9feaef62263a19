//! Latency percentiles over recorded per-sample durations.
//!
//! Only used when a result document carries its per-sample data; the live
//! benchmark loop relies on [`RunningStats`](super::RunningStats) instead.

use serde::{Deserialize, Serialize};

/// Compute a single quantile (R-7, linear interpolation) from a mutable slice.
///
/// Uses `select_nth_unstable_by()` for O(n) expected time; the slice is
/// partially reordered as a side effect. Returns `None` for an empty slice or
/// `p` outside `[0, 1]`.
pub fn compute_quantile(data: &mut [f64], p: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let n = data.len();
    if n == 1 {
        return Some(data[0]);
    }

    let h = (n - 1) as f64 * p;
    let h_floor = h.floor() as usize;
    let h_frac = h - h.floor();

    if h_floor >= n - 1 {
        let (_, &mut max, _) = data.select_nth_unstable_by(n - 1, |a, b| a.total_cmp(b));
        return Some(max);
    }

    let (_, &mut lower, upper) = data.select_nth_unstable_by(h_floor, |a, b| a.total_cmp(b));
    if h_frac == 0.0 {
        return Some(lower);
    }

    let upper_min = upper
        .iter()
        .copied()
        .min_by(|a, b| a.total_cmp(b))
        .unwrap_or(lower);

    Some(lower + h_frac * (upper_min - lower))
}

/// Tail summary of per-check latencies in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyPercentiles {
    /// Median.
    pub p50_ms: f64,
    /// 90th percentile.
    pub p90_ms: f64,
    /// 99th percentile.
    pub p99_ms: f64,
    /// Slowest sample.
    pub max_ms: f64,
}

impl LatencyPercentiles {
    /// Summarize a set of durations. `None` when `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut work = samples.to_vec();
        Some(Self {
            p50_ms: compute_quantile(&mut work, 0.5)?,
            p90_ms: compute_quantile(&mut work, 0.9)?,
            p99_ms: compute_quantile(&mut work, 0.99)?,
            max_ms: compute_quantile(&mut work, 1.0)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let mut data = vec![4.0, 1.0, 3.0, 2.0];
        assert_eq!(compute_quantile(&mut data, 0.5), Some(2.5));
        assert_eq!(compute_quantile(&mut data, 0.0), Some(1.0));
        assert_eq!(compute_quantile(&mut data, 1.0), Some(4.0));
    }

    #[test]
    fn test_quantile_edge_cases() {
        assert_eq!(compute_quantile(&mut [], 0.5), None);
        assert_eq!(compute_quantile(&mut [7.0], 0.3), Some(7.0));
        assert_eq!(compute_quantile(&mut [1.0, 2.0], 1.5), None);
    }

    #[test]
    fn test_percentiles() {
        let samples: Vec<f64> = (1..=100).map(f64::from).collect();
        let p = LatencyPercentiles::from_samples(&samples).unwrap();
        assert!((p.p50_ms - 50.5).abs() < 1e-12);
        assert!((p.p90_ms - 90.1).abs() < 1e-9);
        assert_eq!(p.max_ms, 100.0);
        assert!(LatencyPercentiles::from_samples(&[]).is_none());
    }
}
