//! Probe scenarios - where a run's cases come from.
//!
//! - The built-in argument-shape scenario: the same tool call sent with
//!   `arguments` as `{}`, as `null`, and missing.
//! - Case files: a JSON array of [`ProbeCase`] objects.

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::case::{ArgumentShape, ProbeCase};
use crate::core::{Error, Result};

/// Case names of the built-in scenario, in send order.
pub const EMPTY_OBJECT_CASE: &str = "arguments-empty-object";
pub const NULL_CASE: &str = "arguments-null";
pub const OMITTED_CASE: &str = "arguments-omitted";

/// Three ways a client can fail to supply tool arguments.
pub fn argument_shapes(tool: &str) -> Vec<ProbeCase> {
    vec![
        ProbeCase::tool_call(EMPTY_OBJECT_CASE, tool, ArgumentShape::EmptyObject),
        ProbeCase::tool_call(NULL_CASE, tool, ArgumentShape::Null),
        ProbeCase::tool_call(OMITTED_CASE, tool, ArgumentShape::Omitted),
    ]
}

/// Load cases from a JSON file containing an array of cases.
pub fn load_cases(path: &Path) -> Result<Vec<ProbeCase>> {
    info!("Loading probe cases from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let cases: Vec<ProbeCase> = serde_json::from_str(&content)?;
    debug!("Loaded {} cases", cases.len());
    ensure_unique_names(&cases)?;
    Ok(cases)
}

/// Reject case lists where two cases share a name.
pub fn ensure_unique_names(cases: &[ProbeCase]) -> Result<()> {
    let mut seen = HashSet::with_capacity(cases.len());
    for case in cases {
        if !seen.insert(case.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate probe case name: {}",
                case.name
            )));
        }
    }
    Ok(())
}
