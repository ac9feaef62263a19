//! Throughput of a finished benchmark run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::read_document;
use crate::result::per_second;
use crate::statistics::{LatencyPercentiles, RunningStats, StatsSnapshot};

/// Rates derived from a result header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    /// Number of checks in the run.
    pub checks: usize,
    /// Cumulative time (ms).
    pub elapsed_ms: f64,
    /// Checks per second, `None` when no time was recorded.
    pub checks_per_second: Option<f64>,
    /// Milliseconds per check, `None` when no checks ran.
    pub ms_per_check: Option<f64>,
}

impl Throughput {
    /// Derive rates from a header's `elapsed_ms` and `checks`.
    pub fn from_header(elapsed_ms: f64, checks: usize) -> Self {
        Self {
            checks,
            elapsed_ms,
            checks_per_second: per_second(checks, elapsed_ms),
            ms_per_check: (checks > 0).then(|| elapsed_ms / checks as f64),
        }
    }
}

/// Everything the analyzer reports about one file.
#[derive(Debug, Clone)]
pub struct FileSummary {
    /// Source file.
    pub path: PathBuf,
    /// Short label for tables (see [`label_for`]).
    pub label: String,
    /// Rates from the header.
    pub throughput: Throughput,
    /// Mean/variance recomputed from per-sample data, if present.
    pub stats: Option<StatsSnapshot>,
    /// Latency percentiles from per-sample data, if present.
    pub percentiles: Option<LatencyPercentiles>,
}

/// Header keys shared by every result document, plus per-sample durations.
#[derive(Deserialize)]
struct Header {
    elapsed_ms: f64,
    checks: usize,
    #[serde(default)]
    data: Vec<SampleDuration>,
}

#[derive(Deserialize)]
struct SampleDuration {
    elapsed_ms: f64,
}

/// Table label for a result file: the file name up to the first `_`.
///
/// Result files are conventionally named `<engine>_<scenario>.yaml`.
pub fn label_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split('_').next() {
        Some(prefix) if !prefix.is_empty() => prefix.to_string(),
        _ => name,
    }
}

/// Read a result document and summarize it.
///
/// # Errors
///
/// Fails if the file cannot be read or lacks `elapsed_ms`/`checks`, or if a
/// recorded duration is not finite.
pub fn summarize_file(path: &Path) -> Result<FileSummary> {
    let header: Header = read_document(path)?;

    let (stats, percentiles) = if header.data.is_empty() {
        (None, None)
    } else {
        let durations: Vec<f64> = header.data.iter().map(|s| s.elapsed_ms).collect();
        let mut stats = RunningStats::new();
        stats.try_extend(durations.iter().copied())?;
        (
            Some(stats.snapshot()),
            LatencyPercentiles::from_samples(&durations),
        )
    };

    Ok(FileSummary {
        path: path.to_path_buf(),
        label: label_for(path),
        throughput: Throughput::from_header(header.elapsed_ms, header.checks),
        stats,
        percentiles,
    })
}
