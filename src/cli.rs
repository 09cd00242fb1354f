use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use tool_call_probe::Config;
use tool_call_probe::core::config::parse_timeout_secs;
use tool_call_probe::domains::probes::ReportFormat;

/// Send request-shape variants to a tool-call endpoint and report how each
/// one was answered.
///
/// Without `--cases`, sends the built-in scenario: the same tool call with
/// `arguments` as `{}`, as `null`, and missing.
///
/// Exits non-zero only when the run could not start (invalid URL, bad case
/// file, failed preflight). HTTP error statuses and per-request transport
/// failures are reported, not fatal.
#[derive(Parser, Debug)]
#[command(name = "tool-call-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target endpoint URL
    ///
    /// Default: http://localhost:8001/tools/call
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Tool name used by the built-in scenario
    #[arg(long, value_name = "NAME", conflicts_with = "cases")]
    pub tool: Option<String>,

    /// Load cases from a JSON file instead of the built-in scenario
    ///
    /// JSON format:
    /// ```json
    /// [
    ///   { "name": "empty", "payload": { "name": "list_tables", "arguments": {} } },
    ///   { "name": "no-body" }
    /// ]
    /// ```
    #[arg(long, value_name = "PATH")]
    pub cases: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", value_parser = parse_timeout_secs)]
    pub timeout: Option<Duration>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Check that the target accepts TCP connections before sending any case
    #[arg(long)]
    pub preflight: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.target.url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.target.timeout = timeout;
        }
        if self.preflight {
            config.target.preflight = true;
        }
        if let Some(tool) = &self.tool {
            config.scenario.tool = tool.clone();
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::parse_from(["tool-call-probe"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.target.url, "http://localhost:8001/tools/call");
        assert!(!config.target.preflight);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "tool-call-probe",
            "--url",
            "http://127.0.0.1:9000/call",
            "--timeout",
            "0.5",
            "--format",
            "json",
            "--tool",
            "describe_table",
            "--preflight",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.target.url, "http://127.0.0.1:9000/call");
        assert_eq!(config.target.timeout, Duration::from_millis(500));
        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.scenario.tool, "describe_table");
        assert!(config.target.preflight);
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(Cli::try_parse_from(["tool-call-probe", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["tool-call-probe", "--timeout", "soon"]).is_err());
        assert!(Cli::try_parse_from(["tool-call-probe", "--timeout", "1e20"]).is_err());
    }

    #[test]
    fn test_tool_conflicts_with_cases() {
        let parsed = Cli::try_parse_from([
            "tool-call-probe",
            "--tool",
            "x",
            "--cases",
            "cases.json",
        ]);
        assert!(parsed.is_err());
    }
}
