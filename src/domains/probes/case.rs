//! Probe case definitions.
//!
//! A [`ProbeCase`] is one named request-shape variant. The payload is kept
//! as a raw JSON value so that "field set to `{}`", "field set to `null`"
//! and "field missing" stay three different requests on the wire.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// How the `arguments` field of a tool call is supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentShape {
    /// `"arguments": {}`
    EmptyObject,
    /// `"arguments": null`
    Null,
    /// No `arguments` key at all.
    Omitted,
    /// `"arguments": <value>`
    Value(Value),
}

impl ArgumentShape {
    /// Value to store under `arguments`, or `None` to leave the key out.
    fn into_field(self) -> Option<Value> {
        match self {
            Self::EmptyObject => Some(Value::Object(Map::new())),
            Self::Null => Some(Value::Null),
            Self::Omitted => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// One named request-shape variant to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeCase {
    /// Human label, unique within a run.
    pub name: String,

    /// Request body. `None` sends no body; `Some(Value::Null)` sends `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub payload: Option<Value>,
}

impl ProbeCase {
    /// Create a case with a JSON body.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
        }
    }

    /// Create a case that sends no request body.
    pub fn without_body(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Create a `{"name": tool, "arguments": ...}` tool-call case.
    pub fn tool_call(name: impl Into<String>, tool: &str, arguments: ArgumentShape) -> Self {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(tool.to_string()));
        if let Some(arguments) = arguments.into_field() {
            body.insert("arguments".to_string(), arguments);
        }
        Self::new(name, Value::Object(body))
    }

    /// Serialized request body, or `None` when the case sends no body.
    pub fn body(&self) -> Option<Vec<u8>> {
        // Serializing a Value cannot fail: keys are always strings.
        self.payload
            .as_ref()
            .map(|v| serde_json::to_vec(v).unwrap_or_default())
    }
}

/// Keep an explicit `"payload": null` distinct from a missing key.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
