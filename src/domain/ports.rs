use crate::domain::errors::{ClassifyError, EnhanceError, ExtractError, SourceError};
use crate::domain::mention::Mention;
use crate::domain::sentiment::Classification;
use crate::domain::strategy::StrategyResult;
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MentionSource: Send + Sync {
    /// Fetch the ordered mention sequence for a subject. An empty result is
    /// valid; only a total inability to obtain mentions is an error.
    async fn fetch_mentions(&self, subject: &str) -> Result<Vec<Mention>, SourceError>;
}

/// Per-mention sentiment classification. Implementations must be pure with
/// respect to the label set and safe to call concurrently.
pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification, ClassifyError>;
}

/// Per-mention theme extraction. Output is a small bounded set of
/// canonicalized (lowercase, trimmed) theme keys with duplicates collapsed.
pub trait ThemeExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractError>;
}

#[async_trait]
pub trait TextEnhancer: Send + Sync {
    /// Attempt a generative rewrite of the rule-based strategy. Must fail
    /// closed: any error leaves the caller with the original result.
    async fn enhance(
        &self,
        strategy: &StrategyResult,
        sentiment_summary: &str,
        themes_summary: &str,
        subject: &str,
    ) -> Result<StrategyResult, EnhanceError>;
}
