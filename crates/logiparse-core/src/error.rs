//! Error types for the logiparse-core library.
//!
//! Extraction and validation never fail: missing or malformed fields degrade
//! the validation report instead. These errors only cover the ambient
//! plumbing around the pipeline, such as loading configuration files.

use thiserror::Error;

/// Main error type for the logiparse library.
#[derive(Error, Debug)]
pub enum LogiParseError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the logiparse library.
pub type Result<T> = std::result::Result<T, LogiParseError>;
