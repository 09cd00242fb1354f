//! Tool-call probe harness.
//!
//! Sends a fixed, ordered set of request-shape variants to one JSON
//! tool-call endpoint and records the status and body of each response,
//! so that the way a service handles each shape can be compared.
//!
//! # Architecture
//!
//! - **core**: Configuration and the fatal error type
//! - **domains**: Harness logic
//!   - **probes**: Cases, the runner, results and reports
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_call_probe::core::TargetConfig;
//! use tool_call_probe::domains::probes::{ProbeRunner, scenario};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runner = ProbeRunner::new(TargetConfig::default())?;
//!     let run = runner.run(scenario::argument_shapes("list_tables")).await?;
//!     for result in &run {
//!         println!("{}: {:?}", result.name(), result.status_code());
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Result};
pub use domains::probes::{ProbeCase, ProbeResult, ProbeRun, ProbeRunner};
