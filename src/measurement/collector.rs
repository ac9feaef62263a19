//! The benchmark loop: time an operation once per pre-generated input.
//!
//! All inputs are materialized before the loop starts so input generation and
//! file I/O never fall inside a timed region. Each iteration:
//! 1. Prepares the host for the input (untimed, e.g. set a body transform)
//! 2. Times the operation itself
//! 3. Folds the duration into the running statistics

use crate::error::Result;
use crate::statistics::RunningStats;
use crate::types::TimedSample;

use super::timer::{black_box, Timer};

/// Something the collector can time, given one input.
///
/// Any `FnMut(&T) -> bool` is an operation with no preparation step.
pub trait Operation<T> {
    /// Untimed work done before each timed call.
    fn prepare(&mut self, _input: &T) {}

    /// The timed call. Returns the boolean outcome (true = in collision).
    fn run(&mut self, input: &T) -> bool;
}

impl<T, F> Operation<T> for F
where
    F: FnMut(&T) -> bool,
{
    fn run(&mut self, input: &T) -> bool {
        self(input)
    }
}

/// An operation timed as two separate phases per input.
///
/// Kinematics benchmarks split a query into two host calls (for example
/// "set joint values" and "read end-effector transform") and report each
/// phase's total on its own.
pub trait PhasedOperation<T> {
    /// Untimed work done before each query.
    fn prepare(&mut self, _input: &T) {}

    /// First timed phase.
    fn first(&mut self, input: &T);

    /// Second timed phase.
    fn second(&mut self, input: &T);
}

/// Outcome of timing a single-phase operation over a set of inputs.
#[derive(Debug, Clone)]
pub struct TimedRun<T> {
    /// One entry per input, in input order.
    pub samples: Vec<TimedSample<T>>,
    /// Running statistics over per-sample durations (ms).
    pub stats: RunningStats,
    /// Sum of all durations in milliseconds.
    pub total_ms: f64,
    /// Number of samples whose outcome was `true`.
    pub positives: usize,
}

/// Outcome of timing a two-phase operation over a set of inputs.
#[derive(Debug, Clone, Default)]
pub struct PhasedRun {
    /// Number of queries run.
    pub queries: usize,
    /// Total time spent in the first phase (ms).
    pub first_ms: f64,
    /// Total time spent in the second phase (ms).
    pub second_ms: f64,
    /// Running statistics over per-query totals (ms).
    pub stats: RunningStats,
}

impl PhasedRun {
    /// Sum of both phases in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.first_ms + self.second_ms
    }
}

/// Runs the timing loop.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    /// The timer used for measurements.
    timer: Timer,
    /// Untimed iterations on the first input before measuring.
    warmup_iterations: usize,
}

impl Collector {
    /// Create a collector with the given warmup iterations.
    pub fn new(warmup_iterations: usize) -> Self {
        Self {
            timer: Timer::new(),
            warmup_iterations,
        }
    }

    /// Number of warmup iterations.
    pub fn warmup_iterations(&self) -> usize {
        self.warmup_iterations
    }

    /// Time `op` once per input.
    ///
    /// # Errors
    ///
    /// Fails only if a measured duration is not finite, which indicates a
    /// broken clock.
    pub fn collect<T, O>(&self, inputs: Vec<T>, op: &mut O) -> Result<TimedRun<T>>
    where
        O: Operation<T> + ?Sized,
    {
        if let Some(first) = inputs.first() {
            for _ in 0..self.warmup_iterations {
                op.prepare(first);
                black_box(op.run(first));
            }
        }

        let mut samples = Vec::with_capacity(inputs.len());
        let mut stats = RunningStats::new();
        let mut total_ms = 0.0;
        let mut positives = 0;

        for input in inputs {
            op.prepare(&input);
            let (outcome, elapsed_ms) = self.timer.measure_ms(|| op.run(&input));

            stats.update(elapsed_ms)?;
            total_ms += elapsed_ms;
            if outcome {
                positives += 1;
            }
            samples.push(TimedSample::new(input, elapsed_ms, outcome));
        }

        Ok(TimedRun {
            samples,
            stats,
            total_ms,
            positives,
        })
    }

    /// Time both phases of `op` once per input.
    pub fn collect_phases<T, O>(&self, inputs: &[T], op: &mut O) -> Result<PhasedRun>
    where
        O: PhasedOperation<T> + ?Sized,
    {
        if let Some(first) = inputs.first() {
            for _ in 0..self.warmup_iterations {
                op.prepare(first);
                op.first(first);
                op.second(first);
            }
        }

        let mut run = PhasedRun::default();
        for input in inputs {
            op.prepare(input);
            let ((), first_ms) = self.timer.measure_ms(|| op.first(input));
            let ((), second_ms) = self.timer.measure_ms(|| op.second(input));

            run.stats.update(first_ms + second_ms)?;
            run.first_ms += first_ms;
            run.second_ms += second_ms;
            run.queries += 1;
        }
        Ok(run)
    }
}
