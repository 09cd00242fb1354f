//! Configuration management for the probe harness.
//!
//! Configuration is assembled once in `main` (defaults, then environment,
//! then command-line overrides) and handed to the runner as a plain value.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::domains::probes::ReportFormat;

/// Default tool-call endpoint of a locally running service.
pub const DEFAULT_TARGET_URL: &str = "http://localhost:8001/tools/call";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Tool named in the built-in argument-shape scenario.
pub const DEFAULT_TOOL: &str = "list_tables";

/// Main configuration structure for the probe harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint and request settings.
    pub target: TargetConfig,

    /// Built-in scenario settings.
    pub scenario: ScenarioConfig,

    /// Report output settings.
    pub report: ReportConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Settings for the endpoint under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Full URL of the tool-call endpoint.
    pub url: String,

    /// Per-request timeout. Also bounds the preflight connection.
    pub timeout: Duration,

    /// Open a TCP connection to the target before running any case and
    /// abort the run if that fails.
    pub preflight: bool,
}

/// Settings for the built-in scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Tool name placed in the `name` field of each request.
    pub tool: String,
}

/// Report output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl TargetConfig {
    /// Create a target config for `url` with default timeout and no preflight.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable the connectivity preflight.
    pub fn with_preflight(mut self, preflight: bool) -> Self {
        self.preflight = preflight;
        self
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            preflight: false,
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            scenario: ScenarioConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LoggingConfig {
    /// Logging settings from `PROBE_LOG_LEVEL`.
    ///
    /// Read separately so the subscriber can be installed before the rest of
    /// the environment is parsed.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("PROBE_LOG_LEVEL") {
            logging.level = level;
        }
        logging
    }
}

/// Parse a positive timeout in (possibly fractional) seconds.
pub fn parse_timeout_secs(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid timeout {:?}, expected seconds", s))?;
    if secs <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got {}", s));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout {}: {}", s, e))
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `PROBE_`.
    /// A `.env` file in the working directory is honored.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("PROBE_TARGET_URL") {
            info!("Target URL loaded from environment: {}", url);
            config.target.url = url;
        }

        if let Ok(secs) = std::env::var("PROBE_TIMEOUT_SECS") {
            match parse_timeout_secs(&secs) {
                Ok(timeout) => config.target.timeout = timeout,
                Err(e) => warn!(
                    "Ignoring PROBE_TIMEOUT_SECS: {}, using {}s",
                    e,
                    DEFAULT_TIMEOUT.as_secs()
                ),
            }
        }

        if let Ok(preflight) = std::env::var("PROBE_PREFLIGHT") {
            config.target.preflight = preflight.to_lowercase() == "true" || preflight == "1";
        }

        if let Ok(tool) = std::env::var("PROBE_TOOL") {
            config.scenario.tool = tool;
        }

        if let Ok(format) = std::env::var("PROBE_REPORT_FORMAT") {
            match ReportFormat::from_str(&format, true) {
                Ok(format) => config.report.format = format,
                Err(e) => warn!("Ignoring PROBE_REPORT_FORMAT: {}", e),
            }
        }

        config.logging = LoggingConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "PROBE_TARGET_URL",
            "PROBE_TIMEOUT_SECS",
            "PROBE_PREFLIGHT",
            "PROBE_TOOL",
            "PROBE_REPORT_FORMAT",
            "PROBE_LOG_LEVEL",
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target.url, "http://localhost:8001/tools/call");
        assert_eq!(config.target.timeout, Duration::from_secs(5));
        assert!(!config.target.preflight);
        assert_eq!(config.scenario.tool, "list_tables");
        assert_eq!(config.report.format, ReportFormat::Text);
    }

    #[test]
    fn test_from_env_overrides() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("PROBE_TARGET_URL", "http://127.0.0.1:9999/call");
            std::env::set_var("PROBE_TIMEOUT_SECS", "12");
            std::env::set_var("PROBE_PREFLIGHT", "true");
            std::env::set_var("PROBE_TOOL", "describe_table");
            std::env::set_var("PROBE_REPORT_FORMAT", "json");
        }
        let config = Config::from_env();
        assert_eq!(config.target.url, "http://127.0.0.1:9999/call");
        assert_eq!(config.target.timeout, Duration::from_secs(12));
        assert!(config.target.preflight);
        assert_eq!(config.scenario.tool, "describe_table");
        assert_eq!(config.report.format, ReportFormat::Json);
        clear_env();
    }

    #[test]
    fn test_invalid_env_values_fall_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("PROBE_TIMEOUT_SECS", "soon");
            std::env::set_var("PROBE_REPORT_FORMAT", "yaml");
        }
        let config = Config::from_env();
        assert_eq!(config.target.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.report.format, ReportFormat::Text);
        clear_env();
    }

    #[test]
    fn test_fractional_timeout_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("PROBE_TIMEOUT_SECS", "0.5");
        }
        let config = Config::from_env();
        assert_eq!(config.target.timeout, Duration::from_millis(500));
        clear_env();
    }

    #[test]
    fn test_oversized_timeout_from_env_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("PROBE_TIMEOUT_SECS", "1e20");
        }
        let config = Config::from_env();
        assert_eq!(config.target.timeout, DEFAULT_TIMEOUT);
        clear_env();
    }

    #[test]
    fn test_logging_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        assert_eq!(LoggingConfig::from_env().level, "info");
        unsafe {
            std::env::set_var("PROBE_LOG_LEVEL", "debug");
        }
        assert_eq!(LoggingConfig::from_env().level, "debug");
        assert_eq!(Config::from_env().logging.level, "debug");
        clear_env();
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("2").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_timeout_secs("0.25").unwrap(), Duration::from_millis(250));
        for bad in ["0", "-1", "soon", "NaN", "inf", "1e20"] {
            assert!(parse_timeout_secs(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_target_builder() {
        let target = TargetConfig::new("http://example.test/call")
            .with_timeout(Duration::from_millis(250))
            .with_preflight(true);
        assert_eq!(target.url, "http://example.test/call");
        assert_eq!(target.timeout, Duration::from_millis(250));
        assert!(target.preflight);
    }
}
