//! Wall-clock timing of single host calls.
//!
//! Host operations (collision queries, kinematics updates) take microseconds
//! to milliseconds, so a monotonic `Instant` is precise enough and portable.

use std::hint::black_box as std_black_box;
use std::time::{Duration, Instant};

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
///
/// Wrap results of measured calls so the compiler cannot discard the work or
/// move it across the timing boundary.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Convert a duration to fractional milliseconds.
#[inline]
pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// Monotonic timer for measuring one call at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer;

impl Timer {
    /// Create a timer.
    pub fn new() -> Self {
        Self
    }

    /// Run `f` once and return its result with the elapsed wall-clock time.
    #[inline]
    pub fn measure<F, T>(&self, f: F) -> (T, Duration)
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let out = black_box(f());
        (out, start.elapsed())
    }

    /// Run `f` once and return its result with the elapsed time in milliseconds.
    #[inline]
    pub fn measure_ms<F, T>(&self, f: F) -> (T, f64)
    where
        F: FnOnce() -> T,
    {
        let (out, elapsed) = self.measure(f);
        (out, duration_ms(elapsed))
    }
}
