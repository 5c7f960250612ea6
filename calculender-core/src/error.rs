//! Error types for calculender.

use thiserror::Error;

/// Errors that can occur while talking to the calculender server or
/// the local environment.
#[derive(Error, Debug)]
pub enum CalculenderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not reach the calendar server: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Calendar server responded with HTTP {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Result type alias for calculender operations.
pub type CalculenderResult<T> = Result<T, CalculenderError>;
