//! Observability setup for NekoNet.
//!
//! - `tracing_setup`: global subscriber with optional OpenTelemetry export
//! - `attrs`: span names and attribute keys shared by the CLI and HTTP layer

pub mod attrs;
pub mod tracing_setup;
