//! RSS-backed mention source.
//!
//! One fetch per analysis run, through the shared retry-enabled HTTP
//! client. Items are filtered to those mentioning the subject; no feed
//! state is retained across runs.

use crate::domain::errors::SourceError;
use crate::domain::mention::Mention;
use crate::domain::ports::MentionSource;
use crate::infrastructure::core::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use rss::Channel;
use std::io::Cursor;
use tracing::{debug, info};

pub struct RssMentionSource {
    url: String,
    client: ClientWithMiddleware,
    max_items: usize,
}

impl RssMentionSource {
    pub fn new(url: &str, max_items: usize) -> Self {
        Self {
            url: url.to_string(),
            client: HttpClientFactory::create_client(),
            max_items,
        }
    }
}

/// Turn the feed items mentioning `subject` into mentions, in feed order.
/// Split out from the fetch so it is testable without a network.
pub fn mentions_from_channel(channel: &Channel, subject: &str, max_items: usize) -> Vec<Mention> {
    let subject_lower = subject.to_lowercase();
    let source = if channel.title().is_empty() {
        "rss".to_string()
    } else {
        channel.title().to_string()
    };

    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title().unwrap_or("").trim();
            let description = item.description().unwrap_or("").trim();
            let text = if description.is_empty() {
                title.to_string()
            } else if title.is_empty() {
                description.to_string()
            } else {
                format!("{title}. {description}")
            };

            if text.is_empty() || !text.to_lowercase().contains(&subject_lower) {
                return None;
            }
            Some(Mention::new(text, source.clone()))
        })
        .take(max_items)
        .collect()
}

#[async_trait]
impl MentionSource for RssMentionSource {
    async fn fetch_mentions(&self, subject: &str) -> Result<Vec<Mention>, SourceError> {
        debug!("Fetching RSS feed: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable {
                reason: format!("feed request failed: {e}"),
            })?;

        let bytes = response.bytes().await.map_err(|e| SourceError::Unavailable {
            reason: format!("feed body unreadable: {e}"),
        })?;

        let channel = Channel::read_from(Cursor::new(bytes)).map_err(|e| SourceError::Malformed {
            reason: format!("feed did not parse as RSS: {e}"),
        })?;

        let mentions = mentions_from_channel(&channel, subject, self.max_items);
        info!(
            feed = %channel.title(),
            matched = mentions.len(),
            total = channel.items().len(),
            "RSS fetch complete"
        );
        Ok(mentions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Gadget Weekly</title>
    <link>https://example.com</link>
    <description>gadget news</description>
    <item>
      <title>Vision Pro battery complaints pile up</title>
      <description>Owners report the Vision Pro needs charging constantly.</description>
    </item>
    <item>
      <title>Unrelated headline about toasters</title>
      <description>Nothing to see here.</description>
    </item>
    <item>
      <title>Reviewers love the Vision Pro display</title>
    </item>
  </channel>
</rss>"#;

    fn channel() -> Channel {
        Channel::read_from(Cursor::new(FEED.as_bytes())).unwrap()
    }

    #[test]
    fn test_filters_items_by_subject() {
        let mentions = mentions_from_channel(&channel(), "vision pro", 10);
        assert_eq!(mentions.len(), 2);
        assert!(mentions[0].text.contains("battery complaints"));
        assert_eq!(mentions[0].source, "Gadget Weekly");
    }

    #[test]
    fn test_title_only_items_are_kept() {
        let mentions = mentions_from_channel(&channel(), "Vision Pro", 10);
        assert_eq!(mentions[1].text, "Reviewers love the Vision Pro display");
    }

    #[test]
    fn test_max_items_caps_output() {
        let mentions = mentions_from_channel(&channel(), "Vision Pro", 1);
        assert_eq!(mentions.len(), 1);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let mentions = mentions_from_channel(&channel(), "blender", 10);
        assert!(mentions.is_empty());
    }
}
