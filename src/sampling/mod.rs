//! Synthetic workload generation.
//!
//! Benchmarks draw their inputs up front so that random number generation
//! never lands inside a timed region:
//! - Poses uniformly inside an axis-aligned box, with an axis-angle rotation
//! - Joint configurations uniformly inside per-DOF limits

mod sampler;

pub use sampler::RandomSampler;
