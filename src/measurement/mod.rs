//! Measurement infrastructure for benchmark runs.
//!
//! This module provides:
//! - A monotonic wall-clock [`Timer`]
//! - The [`Collector`] loop that times an [`Operation`] once per input
//! - [`PhasedOperation`] for queries split into two timed host calls

mod collector;
mod timer;

pub use collector::{Collector, Operation, PhasedOperation, PhasedRun, TimedRun};
pub use timer::{black_box, duration_ms, Timer};
