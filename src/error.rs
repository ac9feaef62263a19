//! Error types for sampling, statistics and benchmark drivers.

use thiserror::Error;

/// Errors surfaced by the benchmark harness.
///
/// Every failure is reported synchronously to the immediate caller; nothing in
/// this crate retries or recovers partially.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed axis bounds or mismatched lower/upper joint limits.
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// A NaN or infinite value was pushed into a statistics accumulator.
    #[error("non-finite sample: {0}")]
    NonFiniteSample(f64),

    /// A required key is absent from a benchmark payload.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A benchmark payload could not be interpreted.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// No body with this name exists in the environment.
    #[error("no body named {0:?} in environment")]
    UnknownBody(String),

    /// No robot with this name exists in the environment.
    #[error("no robot named {0:?} in environment")]
    UnknownRobot(String),

    /// The robot has no manipulator with this name.
    #[error("no manipulator named {0:?} on robot")]
    UnknownManipulator(String),

    /// A link reference did not resolve to a link of the named body.
    #[error("no link {link:?} in body {body:?}")]
    UnknownLink {
        /// Link name.
        link: String,
        /// Body the link was looked up in.
        body: String,
    },

    /// A replay record names a checker method that is not supported.
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// A link reference is not of the form `"<link> <body>"`.
    #[error("invalid link reference {0:?}, expected \"<link> <body>\"")]
    InvalidLinkRef(String),

    /// Reading or writing a result file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
