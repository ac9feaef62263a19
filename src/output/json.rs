//! JSON serialization for benchmark reports.

use serde::Serialize;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for report types).
pub fn to_json<R: Serialize + ?Sized>(report: &R) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for report types).
pub fn to_json_pretty<R: Serialize + ?Sized>(report: &R) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
