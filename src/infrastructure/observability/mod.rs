//! Push-based observability for brandlens
//!
//! Metrics are outbound data only: counters accumulate in-process and the
//! CLI logs a JSON snapshot when a run finishes. No HTTP server, no
//! incoming requests.

pub mod metrics;

pub use metrics::Metrics;
