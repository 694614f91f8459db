use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// The derived recommendation and sample social post for one aggregate.
///
/// Immutable once produced; a revision request is a new derivation with a
/// focus hint, never a mutation of an earlier result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub recommendation: String,
    pub tweet: String,
}

/// Tunable thresholds and labels for strategy derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Negative share above which the address-concerns branch fires (strict `>`).
    pub negative_threshold: f64,
    /// Positive share above which the capitalize branch fires (strict `>`).
    pub positive_threshold: f64,
    /// Theme used for the tweet when the run produced no themes.
    pub fallback_theme_label: String,
    /// How many top themes the tweet interpolates.
    pub top_k_themes_for_tweet: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            negative_threshold: 0.4,
            positive_threshold: 0.5,
            fallback_theme_label: "engagement".to_string(),
            top_k_themes_for_tweet: 1,
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.negative_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "negative_threshold",
                value: self.negative_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.positive_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "positive_threshold",
                value: self.positive_threshold,
            });
        }
        if self.top_k_themes_for_tweet == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "top_k_themes_for_tweet",
            });
        }
        if self.fallback_theme_label.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "fallback_theme_label",
                reason: "must not be blank".to_string(),
            });
        }
        Ok(())
    }
}
