//! Config-driven wiring of the analysis pipeline.

use crate::application::aggregator::Aggregator;
use crate::application::pipeline::AnalysisPipeline;
use crate::application::strategist::Strategist;
use crate::config::{Config, SourceMode};
use crate::domain::ports::{MentionSource, TextEnhancer};
use crate::infrastructure::enhancer::OpenAiTextEnhancer;
use crate::infrastructure::nlp::{KeywordThemeExtractor, VaderSentimentClassifier};
use crate::infrastructure::observability::Metrics;
use crate::infrastructure::sources::{MockMentionSource, RssMentionSource};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub fn build_source(config: &Config) -> Arc<dyn MentionSource> {
    match config.source_mode {
        SourceMode::Mock => {
            info!("Mention source: mock ({} mentions)", config.mock_mention_count);
            Arc::new(MockMentionSource::new(config.mock_mention_count))
        }
        SourceMode::Rss => {
            info!("Mention source: RSS ({})", config.rss_feed_url);
            Arc::new(RssMentionSource::new(
                &config.rss_feed_url,
                config.rss_max_items,
            ))
        }
    }
}

pub fn build_pipeline(config: &Config) -> Result<AnalysisPipeline> {
    let source = build_source(config);

    let extractor = match &config.theme_lexicon {
        Some(lexicon) => {
            info!("Theme lexicon: custom ({} entries)", lexicon.len());
            KeywordThemeExtractor::with_lexicon(lexicon.clone(), config.theme_extraction_top_n)
        }
        None => KeywordThemeExtractor::new(config.theme_extraction_top_n),
    };

    let aggregator = Aggregator::new(
        Arc::new(VaderSentimentClassifier::new()),
        Arc::new(extractor),
    );

    let enhancer: Option<Arc<dyn TextEnhancer>> = if config.enhancer_enabled {
        info!("Text enhancer: {} via {}", config.enhancer_model, config.enhancer_api_url);
        Some(Arc::new(OpenAiTextEnhancer::new(
            &config.enhancer_api_url,
            &config.enhancer_api_key,
            &config.enhancer_model,
        )))
    } else {
        None
    };

    Ok(AnalysisPipeline::new(
        source,
        aggregator,
        Strategist::new(config.strategy.clone()),
        enhancer,
        Duration::from_secs(config.enhancer_timeout_seconds),
        Metrics::new()?,
    ))
}
