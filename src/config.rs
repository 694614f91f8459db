use crate::domain::errors::ConfigError;
use crate::domain::strategy::StrategyConfig;
use crate::infrastructure::nlp::keywords::LexiconEntry;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Mock,
    Rss,
}

impl FromStr for SourceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(SourceMode::Mock),
            "rss" => Ok(SourceMode::Rss),
            _ => anyhow::bail!("Invalid SOURCE_MODE: {}. Must be 'mock' or 'rss'", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source_mode: SourceMode,
    pub rss_feed_url: String,
    pub rss_max_items: usize,
    pub mock_mention_count: usize,
    pub strategy: StrategyConfig,
    pub theme_extraction_top_n: usize,
    /// Custom theme lexicon from the TOML profile; None uses the built-in.
    pub theme_lexicon: Option<Vec<LexiconEntry>>,
    pub enhancer_enabled: bool,
    pub enhancer_api_url: String,
    pub enhancer_api_key: String,
    pub enhancer_model: String,
    pub enhancer_timeout_seconds: u64,
    pub export_csv_path: Option<PathBuf>,
    pub observability_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let source_mode_str = env::var("SOURCE_MODE").unwrap_or_else(|_| "mock".to_string());
        let source_mode = SourceMode::from_str(&source_mode_str)?;

        let rss_feed_url = env::var("RSS_FEED_URL").unwrap_or_default();
        let rss_max_items = env::var("RSS_MAX_ITEMS")
            .unwrap_or_else(|_| "50".to_string())
            .parse::<usize>()
            .context("RSS_MAX_ITEMS must be an integer")?;

        let mock_mention_count = env::var("MOCK_MENTION_COUNT")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<usize>()
            .context("MOCK_MENTION_COUNT must be an integer")?;

        let negative_threshold = env::var("NEGATIVE_THRESHOLD")
            .unwrap_or_else(|_| "0.4".to_string())
            .parse::<f64>()
            .context("NEGATIVE_THRESHOLD must be a number")?;
        let positive_threshold = env::var("POSITIVE_THRESHOLD")
            .unwrap_or_else(|_| "0.5".to_string())
            .parse::<f64>()
            .context("POSITIVE_THRESHOLD must be a number")?;
        let fallback_theme_label =
            env::var("FALLBACK_THEME_LABEL").unwrap_or_else(|_| "engagement".to_string());
        let top_k_themes_for_tweet = env::var("TOP_K_THEMES_FOR_TWEET")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<usize>()
            .context("TOP_K_THEMES_FOR_TWEET must be an integer")?;

        let theme_extraction_top_n = env::var("THEME_EXTRACTION_TOP_N")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<usize>()
            .context("THEME_EXTRACTION_TOP_N must be an integer")?;

        let enhancer_enabled = env::var("ENHANCER_ENABLED")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .context("ENHANCER_ENABLED must be true or false")?;
        let enhancer_api_url = env::var("ENHANCER_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());
        let enhancer_api_key = env::var("ENHANCER_API_KEY").unwrap_or_default();
        let enhancer_model =
            env::var("ENHANCER_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let enhancer_timeout_seconds = env::var("ENHANCER_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "8".to_string())
            .parse::<u64>()
            .context("ENHANCER_TIMEOUT_SECONDS must be an integer")?;

        let export_csv_path = env::var("EXPORT_CSV_PATH").ok().map(PathBuf::from);

        let observability_enabled = env::var("OBSERVABILITY_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .context("OBSERVABILITY_ENABLED must be true or false")?;

        let config = Self {
            source_mode,
            rss_feed_url,
            rss_max_items,
            mock_mention_count,
            strategy: StrategyConfig {
                negative_threshold,
                positive_threshold,
                fallback_theme_label,
                top_k_themes_for_tweet,
            },
            theme_extraction_top_n,
            theme_lexicon: None,
            enhancer_enabled,
            enhancer_api_url,
            enhancer_api_key,
            enhancer_model,
            enhancer_timeout_seconds,
            export_csv_path,
            observability_enabled,
        };
        config.validate()?;
        Ok(config)
    }

    /// Invalid values abort the run before any analysis work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.strategy.validate()?;

        if self.theme_extraction_top_n == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "theme_extraction_top_n",
            });
        }
        if self.rss_max_items == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "rss_max_items",
            });
        }
        if self.enhancer_timeout_seconds == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "enhancer_timeout_seconds",
            });
        }

        if self.source_mode == SourceMode::Rss {
            url::Url::parse(&self.rss_feed_url).map_err(|e| ConfigError::Invalid {
                name: "rss_feed_url",
                reason: e.to_string(),
            })?;
        }

        if self.enhancer_enabled && self.enhancer_api_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "enhancer_api_key",
                reason: "required when ENHANCER_ENABLED=true".to_string(),
            });
        }

        Ok(())
    }

    /// Overlay a TOML profile on top of the env-derived configuration.
    pub fn apply_profile(&mut self, profile: Profile) -> Result<(), ConfigError> {
        if let Some(strategy) = profile.strategy {
            if let Some(v) = strategy.negative_threshold {
                self.strategy.negative_threshold = v;
            }
            if let Some(v) = strategy.positive_threshold {
                self.strategy.positive_threshold = v;
            }
            if let Some(v) = strategy.fallback_theme_label {
                self.strategy.fallback_theme_label = v;
            }
            if let Some(v) = strategy.top_k_themes_for_tweet {
                self.strategy.top_k_themes_for_tweet = v;
            }
        }
        if let Some(themes) = profile.themes {
            if let Some(v) = themes.top_n {
                self.theme_extraction_top_n = v;
            }
            if let Some(lexicon) = themes.lexicon {
                self.theme_lexicon = Some(lexicon);
            }
        }
        self.validate()
    }
}

/// Optional TOML profile overriding strategy options and the theme lexicon.
///
/// ```toml
/// [strategy]
/// negative_threshold = 0.35
/// top_k_themes_for_tweet = 2
///
/// [themes]
/// top_n = 3
///
/// [[themes.lexicon]]
/// theme = "comfort"
/// keywords = ["heavy", "strap", "fatigue"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    pub strategy: Option<StrategyOverrides>,
    pub themes: Option<ThemeOverrides>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrategyOverrides {
    pub negative_threshold: Option<f64>,
    pub positive_threshold: Option<f64>,
    pub fallback_theme_label: Option<String>,
    pub top_k_themes_for_tweet: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeOverrides {
    pub top_n: Option<usize>,
    pub lexicon: Option<Vec<LexiconEntry>>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid profile {}", path.display()))
    }
}
