//! Observability subsystem.
//!
//! Structured logging goes through `tracing` and is initialized in the
//! binary; this module owns the metrics facade.

pub mod metrics;
