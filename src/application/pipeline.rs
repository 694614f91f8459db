//! One analysis run end to end: fetch mentions, aggregate, derive a
//! strategy, optionally enhance it through the generative backend.

use crate::application::aggregator::{AggregateOutcome, Aggregator};
use crate::application::strategist::Strategist;
use crate::domain::errors::EnhanceError;
use crate::domain::mention::Mention;
use crate::domain::ports::{MentionSource, TextEnhancer};
use crate::domain::sentiment::SentimentHistogram;
use crate::domain::strategy::StrategyResult;
use crate::domain::theme::ThemeTable;
use crate::infrastructure::observability::Metrics;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Everything a presentation layer needs from one run. Serializes without
/// loss to the flat run record used by the CSV export.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub subject: String,
    pub started_at: DateTime<Utc>,
    pub mentions_total: usize,
    pub histogram: SentimentHistogram,
    pub themes: ThemeTable,
    pub strategy: StrategyResult,
    /// True when the generative rewrite replaced the rule-based text.
    pub enhanced: bool,
    /// Non-fatal conditions surfaced to the caller (enhancer fallback,
    /// dropped mentions).
    pub warnings: Vec<String>,
}

pub struct AnalysisPipeline {
    source: Arc<dyn MentionSource>,
    aggregator: Aggregator,
    strategist: Strategist,
    enhancer: Option<Arc<dyn TextEnhancer>>,
    enhancer_timeout: Duration,
    metrics: Metrics,
}

impl AnalysisPipeline {
    pub fn new(
        source: Arc<dyn MentionSource>,
        aggregator: Aggregator,
        strategist: Strategist,
        enhancer: Option<Arc<dyn TextEnhancer>>,
        enhancer_timeout: Duration,
        metrics: Metrics,
    ) -> Self {
        Self {
            source,
            aggregator,
            strategist,
            enhancer,
            enhancer_timeout,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run one full analysis for `subject`.
    ///
    /// Source failure aborts the run; everything past that point degrades
    /// per-mention and the run always produces a report.
    pub async fn run(&self, subject: &str, focus_hint: Option<&str>) -> Result<AnalysisReport> {
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        info!(%run_id, subject, "Starting analysis run");

        let mentions: Vec<Mention> = self
            .source
            .fetch_mentions(subject)
            .await
            .context("no mentions available")?;
        info!(count = mentions.len(), "Collected mentions");

        let outcome = self.aggregator.aggregate(&mentions);
        self.record_aggregation(&mentions, &outcome);

        let mut warnings = Vec::new();
        if outcome.classification_failures > 0 {
            warnings.push(format!(
                "{} mention(s) dropped due to classification failures",
                outcome.classification_failures
            ));
        }
        if outcome.extraction_failures > 0 {
            warnings.push(format!(
                "{} mention(s) yielded no themes due to extraction failures",
                outcome.extraction_failures
            ));
        }

        let (strategy, enhanced) = self
            .derive_strategy(&outcome.histogram, &outcome.themes, subject, focus_hint, &mut warnings)
            .await;

        self.metrics.runs_total.inc();
        Ok(AnalysisReport {
            run_id,
            subject: subject.to_string(),
            started_at,
            mentions_total: mentions.len(),
            histogram: outcome.histogram,
            themes: outcome.themes,
            strategy,
            enhanced,
            warnings,
        })
    }

    /// Re-derive (and re-enhance) the strategy of an earlier report with a
    /// revision focus. The prior report is left untouched.
    pub async fn revise(&self, report: &AnalysisReport, focus: &str) -> (StrategyResult, Vec<String>) {
        let mut warnings = Vec::new();
        let (strategy, _) = self
            .derive_strategy(
                &report.histogram,
                &report.themes,
                &report.subject,
                Some(focus),
                &mut warnings,
            )
            .await;
        (strategy, warnings)
    }

    async fn derive_strategy(
        &self,
        histogram: &SentimentHistogram,
        themes: &ThemeTable,
        subject: &str,
        focus_hint: Option<&str>,
        warnings: &mut Vec<String>,
    ) -> (StrategyResult, bool) {
        let base = self.strategist.derive(histogram, themes, subject, focus_hint);

        let Some(enhancer) = &self.enhancer else {
            self.metrics.enhancements_total.with_label_values(&["skipped"]).inc();
            return (base, false);
        };

        let attempt = tokio::time::timeout(
            self.enhancer_timeout,
            enhancer.enhance(
                &base,
                &histogram.summary_line(),
                &themes.summary_line(),
                subject,
            ),
        )
        .await;

        match attempt {
            Ok(Ok(enhanced)) => {
                info!("Generative rewrite applied");
                self.metrics.enhancements_total.with_label_values(&["applied"]).inc();
                (enhanced, true)
            }
            Ok(Err(e)) => {
                warn!("Enhancer failed, keeping rule-based strategy: {}", e);
                self.metrics.enhancements_total.with_label_values(&["failed"]).inc();
                warnings.push(format!("enhancement failed: {e}"));
                (base, false)
            }
            Err(_) => {
                let e = EnhanceError::Timeout {
                    seconds: self.enhancer_timeout.as_secs(),
                };
                warn!("Enhancer timed out, keeping rule-based strategy: {}", e);
                self.metrics.enhancements_total.with_label_values(&["failed"]).inc();
                warnings.push(format!("enhancement failed: {e}"));
                (base, false)
            }
        }
    }

    fn record_aggregation(&self, mentions: &[Mention], outcome: &AggregateOutcome) {
        self.metrics.mentions_ingested_total.inc_by(mentions.len() as u64);
        self.metrics
            .classification_failures_total
            .inc_by(outcome.classification_failures as u64);
        self.metrics
            .extraction_failures_total
            .inc_by(outcome.extraction_failures as u64);
    }
}
