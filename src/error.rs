//! Error types for EdCare
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for EdCare operations
///
/// Input-validation rejections (empty text, busy session) are not errors;
/// they are reported as [`crate::session::SubmitOutcome`] values. This enum
/// covers configuration, capture devices, responders, and I/O.
#[derive(Error, Debug)]
pub enum EdcareError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Responder-related errors (reply generation)
    #[error("Responder error: {0}")]
    Responder(String),

    /// Camera or microphone could not be used
    #[error("Capture error: {0}")]
    Capture(String),

    /// Speech recognition session errors
    #[error("Speech recognition error: {0}")]
    Speech(String),

    /// Unknown assistant mode, subject, age group, or symptom
    #[error("Invalid {kind}: {value}")]
    InvalidValue {
        /// What was being parsed (mode, subject, ...)
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors from the interactive session
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for EdCare operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
