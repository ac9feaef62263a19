//! # motion-bench
//!
//! Benchmark harness for robot collision checking and kinematics engines.
//!
//! This crate generates synthetic workloads, times a host engine's queries one
//! by one, and reports:
//! - Total and per-query time, with a streaming mean and variance
//! - Collisions found (collision benchmarks)
//! - Per-phase totals (kinematics benchmarks)
//! - The exact inputs used, so a run can be replayed on another engine
//!
//! The engine itself is abstracted behind the traits in [`host`].
//!
//! ## Inputs Are Generated Before Timing
//!
//! All inputs are drawn (or loaded from a `datafile`) before the first timed
//! call. Random number generation and file I/O never fall inside a measured
//! region.
//!
//! ## Quick Start
//!
//! ```
//! use motion_bench::{AxisBounds, RandomSampler, RunningStats};
//!
//! let mut sampler = RandomSampler::with_seed(42);
//! let poses = sampler.generate_poses(100, &AxisBounds::cube(2.0)).unwrap();
//! assert_eq!(poses.len(), 100);
//!
//! let mut stats = RunningStats::new();
//! stats.try_extend([1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(stats.mean(), 2.5);
//! ```
//!
//! Running against an engine:
//!
//! ```ignore
//! use motion_bench::Benchmark;
//!
//! let report = Benchmark::new()
//!     .samples(50_000)
//!     .extent(2.0)
//!     .outfile("fcl_herb.yaml")
//!     .run_collision(&mut herb)?;
//! println!("{} of {} checks collided", report.collisions, report.checks);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod benchmark;
mod config;
mod error;
mod result;
mod types;

// Functional modules
pub mod analysis;
pub mod command;
pub mod host;
pub mod measurement;
pub mod output;
pub mod replay;
pub mod sampling;
pub mod statistics;
pub mod thread_pool;
pub mod trials;

// Re-exports for public API
pub use benchmark::Benchmark;
pub use config::Config;
pub use error::{Error, Result};
pub use measurement::Timer;
pub use result::{CollisionReport, ForwardKinematicsReport, JacobianReport, Summary};
pub use sampling::RandomSampler;
pub use statistics::{RunningStats, StatsSnapshot};
pub use types::{AxisBounds, JointConfiguration, Pose, SampleInput, TimedSample};
