//! Probes domain module.
//!
//! Sends controlled request-shape variants to a tool-call endpoint and
//! collects comparable results.
//!
//! ## Architecture
//!
//! - `case.rs` - [`ProbeCase`] and the [`ArgumentShape`] builder
//! - `scenario.rs` - Built-in scenario and case-file loading
//! - `runner.rs` - [`ProbeRunner`], the sequential request loop
//! - `result.rs` - [`ProbeResult`] and [`ProbeRun`]
//! - `report.rs` - Text and JSON rendering, kept apart from the runner
//! - `error.rs` - Per-case error types

mod case;
mod error;
pub mod report;
mod result;
mod runner;
pub mod scenario;

pub use case::{ArgumentShape, ProbeCase};
pub use error::{ResponseParseError, TransportError};
pub use report::ReportFormat;
pub use result::{ProbeResult, ProbeRun, ResponseBody};
pub use runner::ProbeRunner;
