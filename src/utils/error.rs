//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Per-line anomalies (unparseable lines, unmatched exits, orphaned frames)
//! are not errors and never show up here.

use thiserror::Error;

/// Errors that can occur while consuming trace input
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Failed to read trace input: {0}")]
    ReadFailed(#[from] std::io::Error),
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
