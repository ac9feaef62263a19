//! Benchmark report types.
//!
//! Field names match the result documents written by earlier versions of the
//! benchmark suite, so old logs can be loaded and compared directly.

use serde::{Deserialize, Serialize};

use crate::measurement::{PhasedRun, TimedRun};
use crate::types::{SampleInput, TimedSample};

/// Result of a collision benchmark (environment or self collision).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: SampleInput", deserialize = "T: SampleInput"))]
pub struct CollisionReport<T> {
    /// Cumulative time spent inside collision checks (ms).
    pub elapsed_ms: f64,
    /// Number of checks performed.
    pub checks: usize,
    /// Mean time per check (ms).
    #[serde(default)]
    pub mean_ms: f64,
    /// Unbiased variance of time per check (ms²).
    #[serde(default)]
    pub variance_ms: f64,
    /// Number of checks that reported a collision.
    #[serde(default)]
    pub collisions: usize,
    /// Per-check inputs, durations and outcomes.
    pub data: Vec<TimedSample<T>>,
}

impl<T> CollisionReport<T> {
    /// Build a report from a finished timing run.
    pub fn from_run(run: TimedRun<T>) -> Self {
        Self {
            elapsed_ms: run.total_ms,
            checks: run.samples.len(),
            mean_ms: run.stats.mean(),
            variance_ms: run.stats.variance(),
            collisions: run.positives,
            data: run.samples,
        }
    }

    /// Summary lines for logging and terminal output.
    pub fn summary(&self, title: &str) -> Summary {
        Summary {
            title: title.to_string(),
            queries: self.checks,
            collisions: Some(self.collisions),
            elapsed_ms: self.elapsed_ms,
            mean_ms: self.mean_ms,
            variance_ms: self.variance_ms,
            phases: Vec::new(),
        }
    }
}

/// Result of a forward kinematics benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardKinematicsReport {
    /// Total time in both phases (ms).
    pub elapsed_ms: f64,
    /// Time spent setting joint values (ms).
    pub dof_elapsed_ms: f64,
    /// Time spent reading the end-effector transform (ms).
    pub ee_elapsed_ms: f64,
    /// Number of queries.
    pub checks: usize,
    /// Mean time per query (ms).
    #[serde(default)]
    pub mean_ms: f64,
    /// Variance of time per query (ms²).
    #[serde(default)]
    pub variance_ms: f64,
}

impl ForwardKinematicsReport {
    /// Build a report from a finished two-phase run.
    pub fn from_run(run: &PhasedRun) -> Self {
        Self {
            elapsed_ms: run.total_ms(),
            dof_elapsed_ms: run.first_ms,
            ee_elapsed_ms: run.second_ms,
            checks: run.queries,
            mean_ms: run.stats.mean(),
            variance_ms: run.stats.variance(),
        }
    }

    /// Summary lines for logging and terminal output.
    pub fn summary(&self) -> Summary {
        Summary {
            title: "forward kinematics".to_string(),
            queries: self.checks,
            collisions: None,
            elapsed_ms: self.elapsed_ms,
            mean_ms: self.mean_ms,
            variance_ms: self.variance_ms,
            phases: vec![
                ("set joint values".to_string(), self.dof_elapsed_ms),
                ("end-effector transform".to_string(), self.ee_elapsed_ms),
            ],
        }
    }
}

/// Result of a Jacobian benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JacobianReport {
    /// Total time in both phases (ms).
    pub elapsed_ms: f64,
    /// Time spent computing translational Jacobians (ms).
    pub translational_ms: f64,
    /// Time spent computing rotational Jacobians (ms).
    pub rotational_ms: f64,
    /// Number of queries.
    pub checks: usize,
    /// Mean time per query (ms).
    #[serde(default)]
    pub mean_ms: f64,
    /// Variance of time per query (ms²).
    #[serde(default)]
    pub variance_ms: f64,
}

impl JacobianReport {
    /// Build a report from a finished two-phase run.
    pub fn from_run(run: &PhasedRun) -> Self {
        Self {
            elapsed_ms: run.total_ms(),
            translational_ms: run.first_ms,
            rotational_ms: run.second_ms,
            checks: run.queries,
            mean_ms: run.stats.mean(),
            variance_ms: run.stats.variance(),
        }
    }

    /// Summary lines for logging and terminal output.
    pub fn summary(&self) -> Summary {
        Summary {
            title: "jacobian".to_string(),
            queries: self.checks,
            collisions: None,
            elapsed_ms: self.elapsed_ms,
            mean_ms: self.mean_ms,
            variance_ms: self.variance_ms,
            phases: vec![
                ("translational jacobian".to_string(), self.translational_ms),
                ("rotational jacobian".to_string(), self.rotational_ms),
            ],
        }
    }
}

/// Human-oriented digest of any report.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Benchmark name.
    pub title: String,
    /// Number of timed queries.
    pub queries: usize,
    /// Collisions found, for collision benchmarks.
    pub collisions: Option<usize>,
    /// Cumulative time (ms).
    pub elapsed_ms: f64,
    /// Mean time per query (ms).
    pub mean_ms: f64,
    /// Variance of time per query (ms²).
    pub variance_ms: f64,
    /// Named per-phase totals (ms).
    pub phases: Vec<(String, f64)>,
}

impl Summary {
    /// Total elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1_000.0
    }

    /// Average seconds per query, `None` when nothing ran.
    pub fn secs_per_query(&self) -> Option<f64> {
        (self.queries > 0).then(|| self.elapsed_secs() / self.queries as f64)
    }

    /// Queries per second, `None` when no time elapsed.
    pub fn queries_per_sec(&self) -> Option<f64> {
        per_second(self.queries, self.elapsed_ms)
    }
}

/// Rate of `count` events over `elapsed_ms`, `None` for a zero or invalid duration.
pub(crate) fn per_second(count: usize, elapsed_ms: f64) -> Option<f64> {
    (elapsed_ms > 0.0 && elapsed_ms.is_finite()).then(|| count as f64 / (elapsed_ms / 1_000.0))
}
