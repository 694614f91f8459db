//! Prometheus metrics definitions for brandlens
//!
//! All metrics use the `brandlens_` prefix. Push-only: counters are
//! accumulated in-process and emitted as a JSON snapshot at the end of a
//! run, never served over HTTP.

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Completed analysis runs
    pub runs_total: IntCounter,
    /// Mentions handed to the aggregator
    pub mentions_ingested_total: IntCounter,
    /// Mentions dropped because classification failed
    pub classification_failures_total: IntCounter,
    /// Mentions that yielded no themes because extraction failed
    pub extraction_failures_total: IntCounter,
    /// Enhancement attempts by outcome (applied / failed / skipped)
    pub enhancements_total: IntCounterVec,
}

/// Serializable snapshot for the end-of-run JSON log line.
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub runs_total: u64,
    pub mentions_ingested_total: u64,
    pub classification_failures_total: u64,
    pub extraction_failures_total: u64,
    pub enhancements_applied: u64,
    pub enhancements_failed: u64,
    pub enhancements_skipped: u64,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let runs_total = IntCounter::with_opts(Opts::new(
            "brandlens_runs_total",
            "Completed analysis runs",
        ))?;
        registry.register(Box::new(runs_total.clone()))?;

        let mentions_ingested_total = IntCounter::with_opts(Opts::new(
            "brandlens_mentions_ingested_total",
            "Mentions handed to the aggregator",
        ))?;
        registry.register(Box::new(mentions_ingested_total.clone()))?;

        let classification_failures_total = IntCounter::with_opts(Opts::new(
            "brandlens_classification_failures_total",
            "Mentions dropped because classification failed",
        ))?;
        registry.register(Box::new(classification_failures_total.clone()))?;

        let extraction_failures_total = IntCounter::with_opts(Opts::new(
            "brandlens_extraction_failures_total",
            "Mentions with zero themes due to extraction failure",
        ))?;
        registry.register(Box::new(extraction_failures_total.clone()))?;

        let enhancements_total = IntCounterVec::new(
            Opts::new(
                "brandlens_enhancements_total",
                "Enhancement attempts by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(enhancements_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            runs_total,
            mentions_ingested_total,
            classification_failures_total,
            extraction_failures_total,
            enhancements_total,
        })
    }

    /// Registry handle for callers that want the full exposition format.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs_total: self.runs_total.get(),
            mentions_ingested_total: self.mentions_ingested_total.get(),
            classification_failures_total: self.classification_failures_total.get(),
            extraction_failures_total: self.extraction_failures_total.get(),
            enhancements_applied: self.enhancements_total.with_label_values(&["applied"]).get(),
            enhancements_failed: self.enhancements_total.with_label_values(&["failed"]).get(),
            enhancements_skipped: self.enhancements_total.with_label_values(&["skipped"]).get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.runs_total.inc();
        metrics.mentions_ingested_total.inc_by(5);
        metrics.enhancements_total.with_label_values(&["failed"]).inc();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.runs_total, 1);
        assert_eq!(snapshot.mentions_ingested_total, 5);
        assert_eq!(snapshot.enhancements_failed, 1);
        assert_eq!(snapshot.enhancements_applied, 0);
    }
}
