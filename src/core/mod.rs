//! Core module containing shared infrastructure components.
//!
//! This module provides configuration and the fatal error type used
//! across the probe harness.

pub mod config;
pub mod error;

pub use config::{Config, TargetConfig};
pub use error::{Error, Result};
