//! Online (streaming) mean and variance using Welford's algorithm.
//!
//! Benchmarks can run for millions of iterations; the accumulator keeps
//! O(1) state and does O(1) work per sample.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Streaming accumulator of count, mean and sum of squared deviations.
///
/// # Example
///
/// ```
/// use motion_bench::RunningStats;
///
/// let mut stats = RunningStats::new();
/// for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     stats.update(x).unwrap();
/// }
/// assert_eq!(stats.count(), 5);
/// assert!((stats.mean() - 3.0).abs() < 1e-12);
/// assert!((stats.variance() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStats {
    /// Number of samples seen.
    count: u64,
    /// Running mean.
    mean: f64,
    /// Welford's M2: sum of squared deviations from the current mean.
    m2: f64,
}

impl RunningStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the running estimates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteSample`] for NaN or infinite input, or when
    /// a finite input would overflow the running mean or M2. The accumulator
    /// is left untouched in both cases.
    pub fn update(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::NonFiniteSample(value));
        }
        let count = self.count + 1;
        let delta = value - self.mean;
        let mean = self.mean + delta / count as f64;
        let m2 = self.m2 + delta * (value - mean);
        if !mean.is_finite() || !m2.is_finite() {
            return Err(Error::NonFiniteSample(value));
        }
        self.count = count;
        self.mean = mean;
        self.m2 = m2;
        Ok(())
    }

    /// Fold every value of an iterator, stopping at the first non-finite one.
    pub fn try_extend<I: IntoIterator<Item = f64>>(&mut self, values: I) -> Result<()> {
        values.into_iter().try_for_each(|v| self.update(v))
    }

    /// Number of samples folded so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// True until the first successful update.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Running mean (0.0 when empty).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance, or exactly 0.0 with fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Freeze the current estimates.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            count: self.count,
            mean: self.mean,
            variance: self.variance(),
        }
    }
}

/// Point-in-time copy of a [`RunningStats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of samples.
    pub count: u64,
    /// Sample mean.
    pub mean: f64,
    /// Sample variance (n-1 denominator).
    pub variance: f64,
}

impl StatsSnapshot {
    /// Standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}
