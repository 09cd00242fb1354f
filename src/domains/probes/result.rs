//! Probe outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::case::ProbeCase;
use super::error::{ResponseParseError, TransportError};

/// Response body of one probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Body parsed as JSON.
    Json { value: Value },
    /// Body was not JSON; the raw text is kept.
    Text {
        raw: String,
        error: ResponseParseError,
    },
}

impl ResponseBody {
    /// Parse a response body, falling back to the raw text.
    pub fn parse(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Self::Json { value },
            Err(e) => Self::Text {
                raw,
                error: e.into(),
            },
        }
    }

    /// The JSON value, if the body parsed.
    pub fn json(&self) -> Option<&Value> {
        match self {
            Self::Json { value } => Some(value),
            Self::Text { .. } => None,
        }
    }
}

/// Captured outcome of one [`ProbeCase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    case: ProbeCase,
    status_code: Option<u16>,
    body: Option<ResponseBody>,
    error: Option<TransportError>,
    elapsed_ms: u64,
}

impl ProbeResult {
    /// A request that got a response and a readable body.
    pub(crate) fn completed(case: ProbeCase, status: u16, body: ResponseBody, elapsed_ms: u64) -> Self {
        Self {
            case,
            status_code: Some(status),
            body: Some(body),
            error: None,
            elapsed_ms,
        }
    }

    /// A request that failed at the transport level. `status` is set when
    /// the failure happened while reading the body.
    pub(crate) fn failed(
        case: ProbeCase,
        status: Option<u16>,
        error: TransportError,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            case,
            status_code: status,
            body: None,
            error: Some(error),
            elapsed_ms,
        }
    }

    pub fn case(&self) -> &ProbeCase {
        &self.case
    }

    pub fn name(&self) -> &str {
        &self.case.name
    }

    /// HTTP status, `None` when no response arrived.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn body(&self) -> Option<&ResponseBody> {
        self.body.as_ref()
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whether the request completed without a transport failure.
    pub fn is_completed(&self) -> bool {
        self.error.is_none()
    }
}

/// Ordered results of one harness invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRun {
    target: String,
    started_at: DateTime<Utc>,
    results: Vec<ProbeResult>,
}

impl ProbeRun {
    pub(crate) fn new(target: impl Into<String>, started_at: DateTime<Utc>, results: Vec<ProbeResult>) -> Self {
        Self {
            target: target.into(),
            started_at,
            results,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProbeResult> {
        self.results.iter()
    }

    /// Look up a result by case name.
    pub fn get(&self, name: &str) -> Option<&ProbeResult> {
        self.results.iter().find(|r| r.name() == name)
    }

    /// Results that failed at the transport level.
    pub fn transport_failures(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| !r.is_completed())
    }

    /// Whether every request got a response.
    pub fn all_completed(&self) -> bool {
        self.results.iter().all(ProbeResult::is_completed)
    }
}

impl<'a> IntoIterator for &'a ProbeRun {
    type Item = &'a ProbeResult;
    type IntoIter = std::slice::Iter<'a, ProbeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_run() -> ProbeRun {
        let ok = ProbeResult::completed(
            ProbeCase::new("ok", json!({})),
            200,
            ResponseBody::parse(r#"{"tables": []}"#.to_string()),
            3,
        );
        let down = ProbeResult::failed(
            ProbeCase::new("down", json!({})),
            None,
            TransportError::Connect("Connection refused".into()),
            1,
        );
        ProbeRun::new("http://localhost:8001/tools/call", Utc::now(), vec![ok, down])
    }

    #[test]
    fn test_parse_json_body() {
        let body = ResponseBody::parse(r#"{"error": "KeyError: 'arguments'"}"#.to_string());
        assert_eq!(body.json().unwrap()["error"], "KeyError: 'arguments'");
    }

    #[test]
    fn test_parse_falls_back_to_text() {
        let body = ResponseBody::parse("Internal Server Error".to_string());
        match body {
            ResponseBody::Text { raw, .. } => assert_eq!(raw, "Internal Server Error"),
            other => panic!("Expected text body, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_body_is_text() {
        assert!(ResponseBody::parse(String::new()).json().is_none());
    }

    #[test]
    fn test_run_lookup_and_failures() {
        let run = sample_run();
        assert_eq!(run.len(), 2);
        assert_eq!(run.get("ok").unwrap().status_code(), Some(200));
        assert!(run.get("missing").is_none());
        assert!(!run.all_completed());

        let failed: Vec<_> = run.transport_failures().map(|r| r.name()).collect();
        assert_eq!(failed, vec!["down"]);
        assert_eq!(run.get("down").unwrap().status_code(), None);
    }

    #[test]
    fn test_run_preserves_order() {
        let names: Vec<_> = sample_run().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["ok", "down"]);
    }
}
