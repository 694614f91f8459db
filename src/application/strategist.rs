//! Rule-based strategy derivation.
//!
//! Pure function of (histogram, theme table, subject, focus hint) under a
//! fixed configuration: identical inputs produce byte-identical output.

use crate::domain::sentiment::SentimentHistogram;
use crate::domain::strategy::{StrategyConfig, StrategyResult};
use crate::domain::theme::ThemeTable;

pub struct Strategist {
    config: StrategyConfig,
}

impl Strategist {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Derive the recommendation and sample post for one aggregate.
    ///
    /// Branch order matters: the address-concerns rule is checked first, so
    /// a histogram crossing both thresholds resolves to it. Both
    /// comparisons are strict.
    pub fn derive(
        &self,
        histogram: &SentimentHistogram,
        themes: &ThemeTable,
        subject: &str,
        focus_hint: Option<&str>,
    ) -> StrategyResult {
        if histogram.is_empty() {
            return StrategyResult {
                recommendation: format!(
                    "Insufficient data; continue monitoring {subject}."
                ),
                tweet: format!(
                    "We're listening! Share your thoughts on {subject} and help shape what comes next."
                ),
            };
        }

        let tweet_theme = match focus_hint {
            Some(focus) => focus.trim().to_lowercase(),
            None => self.tweet_theme(themes),
        };

        let negative_ratio = histogram.negative_ratio();
        let positive_ratio = histogram.positive_ratio();

        if negative_ratio > self.config.negative_threshold {
            StrategyResult {
                recommendation: format!(
                    "Address the leading concerns around {subject} head-on: acknowledge the most-mentioned issues publicly and communicate a remediation timeline."
                ),
                tweet: format!(
                    "We hear your feedback on {tweet_theme}. The {subject} team is on it and will share updates soon."
                ),
            }
        } else if positive_ratio > self.config.positive_threshold {
            StrategyResult {
                recommendation: format!(
                    "Capitalize on the positive reception of {subject}: amplify what customers already praise in upcoming campaigns."
                ),
                tweet: format!(
                    "So much love for {subject} lately! {tweet_theme} keeps coming up in your posts, and we couldn't agree more."
                ),
            }
        } else {
            StrategyResult {
                recommendation: format!(
                    "Sentiment around {subject} is mixed; increase community engagement to clarify perception before shifting strategy."
                ),
                tweet: format!(
                    "What should we improve next in {subject}? Tell us about {tweet_theme} or anything else on your mind."
                ),
            }
        }
    }

    fn tweet_theme(&self, themes: &ThemeTable) -> String {
        let top = themes.top_themes(self.config.top_k_themes_for_tweet);
        if top.is_empty() {
            self.config.fallback_theme_label.clone()
        } else {
            top.join(" and ")
        }
    }
}
