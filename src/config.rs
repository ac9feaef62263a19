//! Configuration for benchmark runs.

use std::path::PathBuf;

use crate::types::AxisBounds;

/// Configuration options for [`Benchmark`](crate::Benchmark).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of random inputs to generate (default: 50,000).
    ///
    /// Ignored when `datafile` is set.
    pub samples: usize,

    /// Untimed iterations on the first input before measuring (default: 0).
    pub warmup: usize,

    /// Optional deterministic seed for input generation.
    ///
    /// When `None` the sampler is seeded from entropy and every run draws
    /// different inputs.
    pub seed: Option<u64>,

    /// Sampling volume for environment collision poses (default: `[0, 2]^3`).
    pub bounds: AxisBounds,

    /// Previous result document whose inputs are replayed instead of sampling.
    pub datafile: Option<PathBuf>,

    /// Where to write the result document. `.json` selects JSON, anything
    /// else YAML.
    pub outfile: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            samples: 50_000,
            warmup: 0,
            seed: None,
            bounds: AxisBounds::cube(2.0),
            datafile: None,
            outfile: None,
        }
    }
}
