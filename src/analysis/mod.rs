//! Offline analysis of saved result documents.
//!
//! Compares runs (typically one per collision engine) by throughput:
//! checks per second and milliseconds per check. When a document carries its
//! per-sample data, the latency distribution is summarized as well.

mod throughput;

pub use throughput::{label_for, summarize_file, FileSummary, Throughput};
