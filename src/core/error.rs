//! Error types and handling for the probe harness.
//!
//! Only fatal conditions live here: anything that stops a run before the
//! first request goes out. Per-case failures are data, see
//! [`TransportError`](crate::domains::probes::TransportError).

use thiserror::Error;

/// A specialized Result type for probe harness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified fatal error type for the probe harness.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors: invalid target URL, duplicate case
    /// names, or a failed connectivity preflight.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors, e.g. while reading a case file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from configuration rather than I/O.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("bad url");
        assert_eq!(err.to_string(), "Configuration error: bad url");
        assert!(err.is_config());
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(!err.is_config());
    }
}
