//! End-to-end pipeline tests over the public API: mock mentions through
//! aggregation, strategy derivation, and the enhancer fallback path.

use async_trait::async_trait;
use brandlens::application::aggregator::Aggregator;
use brandlens::application::pipeline::AnalysisPipeline;
use brandlens::application::strategist::Strategist;
use brandlens::domain::errors::{EnhanceError, SourceError};
use brandlens::domain::mention::Mention;
use brandlens::domain::ports::{MentionSource, TextEnhancer};
use brandlens::domain::strategy::{StrategyConfig, StrategyResult};
use brandlens::infrastructure::nlp::{KeywordThemeExtractor, VaderSentimentClassifier};
use brandlens::infrastructure::observability::Metrics;
use brandlens::infrastructure::sources::MockMentionSource;
use std::sync::Arc;
use std::time::Duration;

fn pipeline_with(
    source: Arc<dyn MentionSource>,
    enhancer: Option<Arc<dyn TextEnhancer>>,
    enhancer_timeout: Duration,
) -> AnalysisPipeline {
    AnalysisPipeline::new(
        source,
        Aggregator::new(
            Arc::new(VaderSentimentClassifier::new()),
            Arc::new(KeywordThemeExtractor::new(2)),
        ),
        Strategist::new(StrategyConfig::default()),
        enhancer,
        enhancer_timeout,
        Metrics::new().unwrap(),
    )
}

fn default_pipeline() -> AnalysisPipeline {
    pipeline_with(
        Arc::new(MockMentionSource::default()),
        None,
        Duration::from_secs(1),
    )
}

struct EmptySource;

#[async_trait]
impl MentionSource for EmptySource {
    async fn fetch_mentions(&self, _subject: &str) -> Result<Vec<Mention>, SourceError> {
        Ok(Vec::new())
    }
}

struct DownSource;

#[async_trait]
impl MentionSource for DownSource {
    async fn fetch_mentions(&self, _subject: &str) -> Result<Vec<Mention>, SourceError> {
        Err(SourceError::Unavailable {
            reason: "connection refused".to_string(),
        })
    }
}

struct MalformedEnhancer;

#[async_trait]
impl TextEnhancer for MalformedEnhancer {
    async fn enhance(
        &self,
        _strategy: &StrategyResult,
        _sentiment_summary: &str,
        _themes_summary: &str,
        _subject: &str,
    ) -> Result<StrategyResult, EnhanceError> {
        Err(EnhanceError::MalformedOutput {
            reason: "no markers".to_string(),
        })
    }
}

struct HangingEnhancer;

#[async_trait]
impl TextEnhancer for HangingEnhancer {
    async fn enhance(
        &self,
        _strategy: &StrategyResult,
        _sentiment_summary: &str,
        _themes_summary: &str,
        _subject: &str,
    ) -> Result<StrategyResult, EnhanceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        unreachable!("timeout should have fired first")
    }
}

struct RewritingEnhancer;

#[async_trait]
impl TextEnhancer for RewritingEnhancer {
    async fn enhance(
        &self,
        _strategy: &StrategyResult,
        _sentiment_summary: &str,
        _themes_summary: &str,
        subject: &str,
    ) -> Result<StrategyResult, EnhanceError> {
        Ok(StrategyResult {
            recommendation: format!("Rewritten plan for {subject}"),
            tweet: "Rewritten post".to_string(),
        })
    }
}

#[tokio::test]
async fn test_mock_run_flags_the_dominant_concerns() {
    let report = default_pipeline().run("Vision Pro", None).await.unwrap();

    // All five canonical mentions classify; none are dropped.
    assert_eq!(report.mentions_total, 5);
    assert_eq!(report.histogram.total(), 5);

    // Three mentions are clearly negative (battery, shipping, overheating),
    // which crosses the 0.4 address-concerns threshold.
    assert!(report.histogram.negative_ratio() > 0.4);
    assert!(
        report
            .strategy
            .recommendation
            .starts_with("Address the leading concerns")
    );
    assert!(report.strategy.recommendation.contains("Vision Pro"));

    // The canonical batch surfaces the expected themes.
    assert!(report.themes.get("battery").is_some());
    assert!(report.themes.get("shipping").is_some());
    assert_eq!(report.themes.get("design").unwrap().count, 2);

    assert!(!report.enhanced);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_repeat_runs_are_deterministic() {
    let pipeline = default_pipeline();
    let first = pipeline.run("Widget", None).await.unwrap();
    let second = pipeline.run("Widget", None).await.unwrap();

    assert_eq!(first.histogram, second.histogram);
    assert_eq!(first.themes, second.themes);
    assert_eq!(first.strategy, second.strategy);
}

#[tokio::test]
async fn test_empty_source_yields_insufficient_data_strategy() {
    let pipeline = pipeline_with(Arc::new(EmptySource), None, Duration::from_secs(1));
    let report = pipeline.run("Ghost Product", None).await.unwrap();

    assert_eq!(report.histogram.total(), 0);
    assert!(report.themes.is_empty());
    assert_eq!(
        report.strategy.recommendation,
        "Insufficient data; continue monitoring Ghost Product."
    );
}

#[tokio::test]
async fn test_unavailable_source_aborts_the_run() {
    let pipeline = pipeline_with(Arc::new(DownSource), None, Duration::from_secs(1));
    let err = pipeline.run("Widget", None).await.unwrap_err();
    assert!(format!("{err:#}").contains("no mentions available"));
}

#[tokio::test]
async fn test_malformed_enhancer_keeps_rule_based_strategy() {
    let base = default_pipeline().run("Widget", None).await.unwrap();

    let enhanced_pipeline = pipeline_with(
        Arc::new(MockMentionSource::default()),
        Some(Arc::new(MalformedEnhancer)),
        Duration::from_secs(1),
    );
    let report = enhanced_pipeline.run("Widget", None).await.unwrap();

    assert_eq!(report.strategy, base.strategy);
    assert!(!report.enhanced);
    assert!(report.warnings.iter().any(|w| w.contains("enhancement failed")));
}

#[tokio::test]
async fn test_hanging_enhancer_times_out_to_fallback() {
    let pipeline = pipeline_with(
        Arc::new(MockMentionSource::default()),
        Some(Arc::new(HangingEnhancer)),
        Duration::from_millis(50),
    );
    let report = pipeline.run("Widget", None).await.unwrap();

    assert!(!report.enhanced);
    assert!(report.warnings.iter().any(|w| w.contains("timed out")));
    assert!(
        report
            .strategy
            .recommendation
            .starts_with("Address the leading concerns")
    );
}

#[tokio::test]
async fn test_successful_enhancer_replaces_strategy_text() {
    let pipeline = pipeline_with(
        Arc::new(MockMentionSource::default()),
        Some(Arc::new(RewritingEnhancer)),
        Duration::from_secs(1),
    );
    let report = pipeline.run("Widget", None).await.unwrap();

    assert!(report.enhanced);
    assert_eq!(report.strategy.recommendation, "Rewritten plan for Widget");
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn test_revise_re_derives_with_focus_without_mutating_report() {
    let pipeline = default_pipeline();
    let report = pipeline.run("Widget", None).await.unwrap();
    let original = report.strategy.clone();

    let (revised, warnings) = pipeline.revise(&report, "pricing").await;

    assert!(revised.tweet.contains("pricing"));
    assert_eq!(revised.recommendation, original.recommendation);
    assert_eq!(report.strategy, original);
    assert!(warnings.is_empty());
}

#[tokio::test]
async fn test_metrics_accumulate_across_runs() {
    let pipeline = default_pipeline();
    pipeline.run("Widget", None).await.unwrap();
    pipeline.run("Widget", None).await.unwrap();

    let snapshot = pipeline.metrics().snapshot();
    assert_eq!(snapshot.runs_total, 2);
    assert_eq!(snapshot.mentions_ingested_total, 10);
    assert_eq!(snapshot.enhancements_skipped, 2);
}
