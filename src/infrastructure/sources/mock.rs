use crate::domain::errors::SourceError;
use crate::domain::mention::Mention;
use crate::domain::ports::MentionSource;
use async_trait::async_trait;
use rand::Rng;
use tracing::info;

/// The canonical demo batch: every run sees these five first, in order.
const BASE_MENTIONS: &[&str] = &[
    "I love the design of the new {subject}! So sleek.",
    "The {subject} battery life sucks. Needs charging all the time!",
    "I'm still waiting for my {subject} to arrive. Shipping delays are insane.",
    "{subject} is overpriced, but I can't lie, it's beautiful.",
    "Why is {subject} heating up so fast? Not safe.",
];

/// Extra pool sampled when a larger batch is configured.
const EXTRA_MENTIONS: &[&str] = &[
    "Customer support for {subject} resolved my issue in minutes. Impressed.",
    "Just unboxed my {subject}. The screen is gorgeous.",
    "My {subject} started lagging after the latest update.",
    "Returned my {subject} for a refund. Not worth the price.",
    "Is anyone else's {subject} randomly restarting?",
    "The {subject} keeps getting better with every software update.",
    "Honestly the {subject} camera blew me away on vacation.",
    "Two weeks in and the {subject} strap already broke. Cheap materials.",
];

/// Simulated mention feed for demos and tests. In a real deployment this is
/// replaced by a social platform connector behind the same port.
pub struct MockMentionSource {
    mention_count: usize,
}

impl MockMentionSource {
    pub fn new(mention_count: usize) -> Self {
        Self { mention_count }
    }
}

impl Default for MockMentionSource {
    fn default() -> Self {
        Self::new(BASE_MENTIONS.len())
    }
}

fn render(template: &str, subject: &str) -> String {
    template.replace("{subject}", subject)
}

#[async_trait]
impl MentionSource for MockMentionSource {
    async fn fetch_mentions(&self, subject: &str) -> Result<Vec<Mention>, SourceError> {
        info!("Collecting mentions from simulated data source...");

        let mut mentions: Vec<Mention> = BASE_MENTIONS
            .iter()
            .take(self.mention_count)
            .map(|t| Mention::new(render(t, subject), "mock"))
            .collect();

        let mut rng = rand::rng();
        while mentions.len() < self.mention_count {
            let template = EXTRA_MENTIONS[rng.random_range(0..EXTRA_MENTIONS.len())];
            mentions.push(Mention::new(render(template, subject), "mock"));
        }

        Ok(mentions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_is_the_five_canonical_mentions() {
        let source = MockMentionSource::default();
        let mentions = tokio_test::block_on(source.fetch_mentions("Vision Pro")).unwrap();

        assert_eq!(mentions.len(), 5);
        assert!(mentions[0].text.contains("design of the new Vision Pro"));
        assert!(mentions.iter().all(|m| m.source == "mock"));
    }

    #[test]
    fn test_larger_batches_sample_from_the_extra_pool() {
        let source = MockMentionSource::new(12);
        let mentions = tokio_test::block_on(source.fetch_mentions("Widget")).unwrap();

        assert_eq!(mentions.len(), 12);
        // The canonical five always lead the batch.
        assert!(mentions[1].text.contains("battery life sucks"));
        assert!(mentions.iter().all(|m| m.text.contains("Widget")));
    }

    #[test]
    fn test_truncated_batch_preserves_order() {
        let source = MockMentionSource::new(2);
        let mentions = tokio_test::block_on(source.fetch_mentions("W")).unwrap();
        assert_eq!(mentions.len(), 2);
        assert!(mentions[0].text.contains("love the design"));
    }
}
