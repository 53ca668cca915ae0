//! Error types for httpbench-core

use std::fmt;

use thiserror::Error;

/// Broad category of an engine error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid run configuration
    Config,
    /// A required builder field was never set
    MissingConfig,
    /// Worker pool or dispatcher failure
    Orchestration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "configuration error",
            ErrorKind::MissingConfig => "missing configuration",
            ErrorKind::Orchestration => "orchestration error",
        };
        f.write_str(name)
    }
}

/// Core error type
///
/// Per-request failures never surface here; they are recorded as failed
/// [`Outcome`](crate::Outcome)s. A `BenchError` means the run itself could
/// not be set up or driven to completion.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct BenchError {
    /// Error category
    pub kind: ErrorKind,
    /// Human readable detail
    pub message: String,
}

impl BenchError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// A builder was finished without a required field
    pub fn missing_config(field: &str) -> Self {
        Self::new(ErrorKind::MissingConfig, format!("`{field}` is required"))
    }

    /// Dispatcher or worker pool failure
    pub fn orchestration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Orchestration, message)
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_names_field() {
        let err = BenchError::missing_config("client");
        assert_eq!(err.kind, ErrorKind::MissingConfig);
        assert!(err.message.contains("client"));
        assert_eq!(err.to_string(), "missing configuration: `client` is required");
    }
}
