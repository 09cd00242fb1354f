//! Per-case error types.
//!
//! These never abort a run. They are recorded on the [`ProbeResult`] of the
//! case that produced them.
//!
//! [`ProbeResult`]: super::ProbeResult

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request that did not complete at the transport level.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum TransportError {
    /// The request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The connection could not be established (refused, DNS failure).
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The response body could not be read after the status arrived.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other request failure.
    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Classify a reqwest failure.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let msg = error_chain(err);
        if err.is_timeout() {
            Self::Timeout(msg)
        } else if err.is_connect() {
            Self::Connect(msg)
        } else if err.is_body() || err.is_decode() {
            Self::Body(msg)
        } else {
            Self::Request(msg)
        }
    }

    /// Short label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Connect(_) => "connect",
            Self::Body(_) => "body",
            Self::Request(_) => "request",
        }
    }
}

/// The response body was not valid JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Response is not valid JSON: {message}")]
pub struct ResponseParseError {
    pub message: String,
}

impl From<serde_json::Error> for ResponseParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Flatten an error and its sources into one line.
///
/// reqwest's top-level message ("error sending request") hides the useful
/// part, e.g. "Connection refused".
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    msg
}
