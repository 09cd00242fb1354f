//! Domains module containing the harness logic.

pub mod probes;
