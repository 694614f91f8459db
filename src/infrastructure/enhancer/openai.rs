//! Generative strategy rewriting over an OpenAI-compatible
//! chat-completions endpoint.
//!
//! The model is instructed to answer with exactly two marked lines:
//!
//! ```text
//! Recommendation: <rewritten recommendation>
//! Tweet: <rewritten social post>
//! ```
//!
//! Replies missing either marker fail closed; the caller keeps the
//! rule-based strategy untouched.

use crate::domain::errors::EnhanceError;
use crate::domain::ports::TextEnhancer;
use crate::domain::strategy::StrategyResult;
use crate::infrastructure::core::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::debug;

const RECOMMENDATION_MARKER: &str = "recommendation:";
const TWEET_MARKER: &str = "tweet:";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct OpenAiTextEnhancer {
    client: ClientWithMiddleware,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTextEnhancer {
    pub fn new(api_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: HttpClientFactory::create_client(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn build_prompt(
        strategy: &StrategyResult,
        sentiment_summary: &str,
        themes_summary: &str,
        subject: &str,
    ) -> String {
        format!(
            "You are a social media strategist. A rule-based system analyzed mentions of \"{subject}\" \
             (sentiment: {sentiment_summary}; themes: {themes_summary}) and produced:\n\
             Recommendation: {recommendation}\n\
             Tweet: {tweet}\n\
             Rewrite both to be sharper and more natural while keeping the same intent. \
             Reply with exactly two lines, one starting with \"Recommendation:\" and one starting with \"Tweet:\".",
            recommendation = strategy.recommendation,
            tweet = strategy.tweet,
        )
    }
}

/// Extract the marked lines from a model reply. Fails closed when either
/// marker is missing or carries no text.
pub fn parse_enhanced_output(raw: &str) -> Result<StrategyResult, EnhanceError> {
    let mut recommendation: Option<String> = None;
    let mut tweet: Option<String> = None;

    for line in raw.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        if recommendation.is_none() && lower.starts_with(RECOMMENDATION_MARKER) {
            recommendation = Some(trimmed[RECOMMENDATION_MARKER.len()..].trim().to_string());
        } else if tweet.is_none() && lower.starts_with(TWEET_MARKER) {
            tweet = Some(trimmed[TWEET_MARKER.len()..].trim().to_string());
        }
    }

    match (recommendation, tweet) {
        (Some(recommendation), Some(tweet))
            if !recommendation.is_empty() && !tweet.is_empty() =>
        {
            Ok(StrategyResult {
                recommendation,
                tweet,
            })
        }
        _ => Err(EnhanceError::MalformedOutput {
            reason: "expected non-empty 'Recommendation:' and 'Tweet:' lines".to_string(),
        }),
    }
}

#[async_trait]
impl TextEnhancer for OpenAiTextEnhancer {
    async fn enhance(
        &self,
        strategy: &StrategyResult,
        sentiment_summary: &str,
        themes_summary: &str,
        subject: &str,
    ) -> Result<StrategyResult, EnhanceError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(strategy, sentiment_summary, themes_summary, subject),
            }],
            temperature: 0.7,
        };

        let body = serde_json::to_string(&request).map_err(|e| EnhanceError::Unavailable {
            reason: format!("failed to serialize request: {e}"),
        })?;

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| EnhanceError::Unavailable {
                reason: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnhanceError::Unavailable {
                reason: format!("endpoint returned {status}"),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            EnhanceError::MalformedOutput {
                reason: format!("response body did not parse: {e}"),
            }
        })?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| EnhanceError::MalformedOutput {
                reason: "response carried no choices".to_string(),
            })?;

        debug!(chars = content.len(), "Enhancer reply received");
        parse_enhanced_output(content)
    }
}
