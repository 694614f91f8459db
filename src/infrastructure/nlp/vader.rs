//! Local NLP-based sentiment classification using VADER
//!
//! VADER is tuned for social media text, which matches the short mention
//! format well. The general lexicon still misses product-feedback jargon
//! ("overpriced", "bricked"), so the compound score is boosted with a
//! consumer-keyword table before mapping to a label.

use crate::domain::errors::ClassifyError;
use crate::domain::ports::SentimentClassifier;
use crate::domain::sentiment::{Classification, SentimentLabel};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Product-feedback keywords and their polarity boosts.
const POSITIVE_KEYWORDS: &[(&str, f64)] = &[
    ("sleek", 0.3),
    ("gorgeous", 0.4),
    ("stunning", 0.4),
    ("beautiful", 0.3),
    ("blew me away", 0.5),
    ("game changer", 0.5),
    ("must-have", 0.4),
    ("worth every penny", 0.5),
    ("works flawlessly", 0.4),
    ("top notch", 0.4),
    ("impressed", 0.3),
    ("recommend", 0.3),
];

const NEGATIVE_KEYWORDS: &[(&str, f64)] = &[
    ("overpriced", -0.5),
    ("rip-off", -0.6),
    ("ripoff", -0.6),
    ("scam", -0.6),
    ("refund", -0.3),
    ("broken", -0.5),
    ("bricked", -0.6),
    ("defective", -0.5),
    ("delay", -0.3),
    ("delays", -0.3),
    ("waiting", -0.2),
    ("heating up", -0.4),
    ("overheating", -0.5),
    ("not safe", -0.5),
    ("lagging", -0.4),
    ("drains", -0.3),
    ("unusable", -0.6),
    ("disappointed", -0.4),
];

/// Sentiment classifier backed by the VADER algorithm with product-feedback
/// keyword boosting. Read-only after construction, safe to share across the
/// worker pool.
pub struct VaderSentimentClassifier {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderSentimentClassifier {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn keyword_boost(&self, text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        let mut boost = 0.0;

        for (keyword, score) in POSITIVE_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score;
            }
        }

        for (keyword, score) in NEGATIVE_KEYWORDS {
            if text_lower.contains(keyword) {
                boost += score; // score is already negative
            }
        }

        boost
    }

    /// Combined polarity score in [-1, 1].
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(text);
        let vader_score = scores["compound"];
        let combined = vader_score + (self.keyword_boost(text) * 0.5);
        combined.clamp(-1.0, 1.0)
    }
}

impl Default for VaderSentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentClassifier for VaderSentimentClassifier {
    fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        if text.trim().is_empty() {
            return Ok(Classification::new(SentimentLabel::Neutral, None));
        }

        let score = self.score(text);
        Ok(Classification::new(
            SentimentLabel::from_score(score),
            Some(score.abs()),
        ))
    }
}
