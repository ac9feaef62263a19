//! Output formatting and result files.
//!
//! Result documents are YAML by default; a `.json` extension selects JSON.
//! Both carry the same field names.

pub mod json;
pub mod terminal;
pub mod yaml;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{SampleInput, TimedSample};

/// Serialization format of a result document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl Format {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Serialize `report` and write it to `path`, replacing any existing file.
pub fn write_report<R: Serialize>(path: &Path, report: &R) -> Result<()> {
    let text = match Format::from_path(path) {
        Format::Yaml => yaml::to_yaml(report)?,
        Format::Json => json::to_json_pretty(report)?,
    };
    fs::write(path, text)?;
    Ok(())
}

/// Read and parse a whole document from `path`.
pub fn read_document<D: DeserializeOwned>(path: &Path) -> Result<D> {
    let text = fs::read_to_string(path)?;
    match Format::from_path(path) {
        Format::Yaml => yaml::from_yaml(&text),
        Format::Json => Ok(serde_json::from_str(&text)?),
    }
}

/// Only the `data` list of a result document; header keys are ignored.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: SampleInput"))]
struct SampleSet<T> {
    data: Vec<TimedSample<T>>,
}

/// Load the inputs recorded in a previous result document.
///
/// Used to re-run a benchmark on exactly the inputs of an earlier run.
pub fn load_inputs<T: SampleInput>(path: &Path) -> Result<Vec<T>> {
    let set: SampleSet<T> = read_document(path)?;
    Ok(set.data.into_iter().map(TimedSample::into_input).collect())
}
