// Error types for pagewait

use std::time::Duration;
use thiserror::Error;

/// Result type alias for pagewait operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when querying elements or waiting on them
#[derive(Debug, Error)]
pub enum Error {
    /// Timeout waiting for a condition
    ///
    /// The only failure a wait ever reports. `last_error` carries the most recent
    /// check error, if the final polls failed rather than observed a false condition.
    #[error("Timeout after {timeout:?} waiting for {condition}{}", last_error_suffix(.last_error))]
    Timeout {
        condition: String,
        timeout: Duration,
        last_error: Option<String>,
    },

    /// Element not found by selector
    ///
    /// Raised when a single-element reference cannot be resolved against the
    /// current page (no match, or the requested position is out of range).
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element was detached from the document between lookup and use
    #[error("Stale element: {0}")]
    StaleElement(String),

    /// Browser-automation driver reported an error
    #[error("Driver error: {0}")]
    Driver(String),

    /// Selector could not be constructed
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Invalid wait configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true if this is a wait timeout (possibly wrapped in context)
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Context(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }
}

fn last_error_suffix(last_error: &Option<String>) -> String {
    match last_error {
        Some(e) => format!(" (last error: {})", e),
        None => String::new(),
    }
}
