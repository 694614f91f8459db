use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" => Ok(Self::Positive),
            "negative" | "neg" => Ok(Self::Negative),
            "neutral" | "neu" => Ok(Self::Neutral),
            _ => anyhow::bail!(
                "Invalid sentiment label: {}. Must be 'positive', 'negative' or 'neutral'",
                s
            ),
        }
    }
}

impl SentimentLabel {
    /// Map a polarity score in [-1, 1] to a label. The +/-0.05 band follows
    /// the VADER convention for treating weak signals as neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.05 {
            Self::Positive
        } else if score < -0.05 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// One classified mention: the label plus an optional backend confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    pub confidence: Option<f64>,
}

impl Classification {
    pub fn new(label: SentimentLabel, confidence: Option<f64>) -> Self {
        Self { label, confidence }
    }
}

/// Count of successfully classified mentions per sentiment label.
///
/// Mentions whose classification failed are not represented anywhere in
/// the histogram, so `total()` can be below the raw mention count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentHistogram {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentHistogram {
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn count(&self, label: SentimentLabel) -> u64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Share of a label among classified mentions. 0.0 for an empty histogram.
    pub fn ratio(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(label) as f64 / total as f64
    }

    pub fn positive_ratio(&self) -> f64 {
        self.ratio(SentimentLabel::Positive)
    }

    pub fn negative_ratio(&self) -> f64 {
        self.ratio(SentimentLabel::Negative)
    }

    /// One-line rendering for reports and enhancer prompts.
    pub fn summary_line(&self) -> String {
        format!(
            "positive={} negative={} neutral={}",
            self.positive, self.negative, self.neutral
        )
    }
}
