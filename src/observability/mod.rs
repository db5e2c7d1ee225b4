//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; request ID flows through all log lines
//! - Log level configurable via config and RUST_LOG

pub mod logging;
