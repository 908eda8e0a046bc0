//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate, initialized once in main
//! - Log level configurable through RUST_LOG

pub mod logging;
