//! Probe harness entry point.
//!
//! Loads configuration, runs the probe cases against the target endpoint
//! and prints the report to stdout. Logs go to stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tool_call_probe::Config;
use tool_call_probe::core::config::LoggingConfig;
use tool_call_probe::domains::probes::{ProbeRunner, report, scenario};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging comes up first so warnings about the environment are visible
    let mut logging = LoggingConfig::from_env();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    init_logging(&logging.level);

    // Environment first, then command-line overrides
    let mut config = Config::from_env();
    cli.apply(&mut config);

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let cases = match &cli.cases {
        Some(path) => scenario::load_cases(path)
            .with_context(|| format!("Failed to load cases from {}", path.display()))?,
        None => scenario::argument_shapes(&config.scenario.tool),
    };

    let runner = ProbeRunner::new(config.target.clone())?;
    let run = runner.run(cases).await?;

    let failures = run.transport_failures().count();
    if failures > 0 {
        warn!("{} of {} cases failed at the transport level", failures, run.len());
    }

    println!("{}", report::render(&run, config.report.format)?);

    info!("Probe run finished");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level, writing to stderr so
/// the report on stdout stays clean.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
