//! Rendering a [`ProbeRun`] for people or for other tools.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::result::{ProbeResult, ProbeRun, ResponseBody};
use crate::core::Result;

/// Output format of the run report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One block per case, readable in a terminal.
    #[default]
    Text,
    /// The whole run as pretty-printed JSON.
    Json,
}

/// Render a run in the requested format.
pub fn render(run: &ProbeRun, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(run)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(run)?),
    }
}

/// Plain-text report, one block per case in run order.
pub fn render_text(run: &ProbeRun) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Target:  {}", run.target());
    let _ = writeln!(out, "Started: {}", run.started_at().to_rfc3339());

    for (index, result) in run.iter().enumerate() {
        out.push('\n');
        write_result(&mut out, index + 1, result);
    }

    let failures = run.transport_failures().count();
    let _ = writeln!(
        out,
        "\n{} cases, {} completed, {} transport failures",
        run.len(),
        run.len() - failures,
        failures
    );

    out
}

fn write_result(out: &mut String, index: usize, result: &ProbeResult) {
    let _ = writeln!(out, "[{}] {} ({}ms)", index, result.name(), result.elapsed_ms());

    let request = match &result.case().payload {
        Some(payload) => payload.to_string(),
        None => "<no body>".to_string(),
    };
    let _ = writeln!(out, "    request: {}", request);

    match result.status_code() {
        Some(status) => {
            let _ = writeln!(out, "    status:  {}", status);
        }
        None => {
            let _ = writeln!(out, "    status:  <no response>");
        }
    }

    match result.body() {
        Some(ResponseBody::Json { value }) => {
            let _ = writeln!(out, "    body:    {}", value);
        }
        Some(ResponseBody::Text { raw, error }) => {
            let _ = writeln!(out, "    body:    {:?} ({})", raw, error);
        }
        None => {}
    }

    if let Some(error) = result.error() {
        let _ = writeln!(out, "    error:   [{}] {}", error.kind(), error);
    }
}
