//! Error types for the bilicmt crate
//!
//! Domain-specific errors are defined per concern ([`FetchError`],
//! [`ParseError`], [`AnalysisError`]) and wrapped by a unified [`Error`]
//! enum for use across module boundaries.
//!
//! The propagation policy follows the crawler's partial-result design:
//! only input errors (an unrecognizable video URL) abort a run outright.
//! Per-page fetch failures are handled locally by the retrieval loop,
//! which keeps whatever it has already collected.

use std::io;
use thiserror::Error;

/// Errors that can occur during HTTP fetching of comment pages
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server responded with a non-success status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Payload could not be decoded as the expected JSON shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors that can occur while interpreting user input
#[derive(Error, Debug)]
pub enum ParseError {
    /// URL does not contain a BV-style video identifier
    #[error("No BV id found in URL: {0} (expected something like https://www.bilibili.com/video/BV1yW421N7aH)")]
    BvidNotFound(String),
}

/// Errors that can occur during text analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input CSV has no `text` column
    #[error("Column '{0}' not found in input (available: {1})")]
    ColumnNotFound(String, String),

    /// Malformed CSV row or frequency line
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Input file contained no usable rows
    #[error("Input contained no rows")]
    EmptyInput,
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout)
    Network,
    /// Parsing and data extraction errors
    Parsing,
    /// Storage and I/O errors
    Storage,
    /// Configuration and validation errors
    Config,
}

/// Unified error type for the bilicmt crate
///
/// Wraps the domain-specific errors so callers can handle everything
/// through a single type while keeping the detailed error information.
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Input parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Text analysis errors
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is transient (a retrying caller could recover)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => !matches!(e, FetchError::MalformedResponse(_)),
            Self::Parse(_) | Self::Analysis(_) | Self::Json(_) | Self::Config(_) => false,
            Self::Io(_) => true,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(FetchError::MalformedResponse(_)) => ErrorCategory::Parsing,
            Self::Fetch(_) => ErrorCategory::Network,
            Self::Parse(_) | Self::Analysis(_) | Self::Json(_) => ErrorCategory::Parsing,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let fetch_err = Error::Fetch(FetchError::Timeout);
        assert_eq!(fetch_err.category(), ErrorCategory::Network);

        let parse_err = Error::Parse(ParseError::BvidNotFound("x".into()));
        assert_eq!(parse_err.category(), ErrorCategory::Parsing);

        let malformed = Error::Fetch(FetchError::MalformedResponse("bad json".into()));
        assert_eq!(malformed.category(), ErrorCategory::Parsing);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Fetch(FetchError::Timeout).is_recoverable());
        assert!(Error::Fetch(FetchError::ServerError(503)).is_recoverable());
        assert!(!Error::Parse(ParseError::BvidNotFound("x".into())).is_recoverable());
        assert!(!Error::Fetch(FetchError::MalformedResponse("x".into())).is_recoverable());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("max_pages must be positive");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: Error = FetchError::ServerError(500).into();
        assert!(matches!(err, Error::Fetch(_)));

        let err: Error = AnalysisError::EmptyInput.into();
        assert!(matches!(err, Error::Analysis(_)));
    }
}
