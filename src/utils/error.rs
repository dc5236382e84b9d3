//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a profiler log
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unable to detect the installation path. Does the file contain profiler data?")]
    UnsupportedInput,

    #[error("Invalid profiler result: {0}")]
    MalformedLine(String),

    #[error("Invalid frame or metrics segment: {0}")]
    MalformedFrame(String),

    #[error("Invalid {field} value: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Failed to generate flamegraph: {0}")]
    GenerationFailed(String),

    #[error("Empty stack data")]
    EmptyStacks,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
