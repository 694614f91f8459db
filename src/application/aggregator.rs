//! Mention aggregation: per-mention classification and theme extraction
//! folded into a sentiment histogram and a theme table.
//!
//! Classification and extraction have no cross-mention dependency, so the
//! per-mention work runs on the rayon pool. The fold itself stays
//! sequential in original mention order, which keeps the last-write-wins
//! dominant-sentiment semantics deterministic.

use crate::domain::mention::Mention;
use crate::domain::ports::{SentimentClassifier, ThemeExtractor};
use crate::domain::sentiment::{Classification, SentimentHistogram, SentimentLabel};
use crate::domain::theme::ThemeTable;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutcome {
    pub histogram: SentimentHistogram,
    pub themes: ThemeTable,
    /// Mentions that received a sentiment classification.
    pub classified: usize,
    /// Mentions dropped because the classifier failed. Never counted in the
    /// histogram or the theme table.
    pub classification_failures: usize,
    /// Mentions whose extraction failed; they keep their histogram slot but
    /// contribute no themes.
    pub extraction_failures: usize,
}

struct MentionAnalysis {
    classification: Option<Classification>,
    themes: Vec<String>,
    extraction_failed: bool,
}

pub struct Aggregator {
    classifier: Arc<dyn SentimentClassifier>,
    extractor: Arc<dyn ThemeExtractor>,
}

impl Aggregator {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, extractor: Arc<dyn ThemeExtractor>) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    /// Single pass over the mention list. Never fails: an empty input yields
    /// a zero histogram and an empty theme table.
    pub fn aggregate(&self, mentions: &[Mention]) -> AggregateOutcome {
        let analyses: Vec<MentionAnalysis> = mentions
            .par_iter()
            .enumerate()
            .map(|(index, mention)| self.analyze_one(index, mention))
            .collect();

        let mut outcome = AggregateOutcome::default();
        for analysis in analyses {
            match analysis.classification {
                Some(classification) => {
                    outcome.histogram.record(classification.label);
                    outcome.classified += 1;
                    for theme in &analysis.themes {
                        outcome.themes.observe(theme, classification.label);
                    }
                }
                None => outcome.classification_failures += 1,
            }
            if analysis.extraction_failed {
                outcome.extraction_failures += 1;
            }
        }

        debug!(
            classified = outcome.classified,
            dropped = outcome.classification_failures,
            themes = outcome.themes.len(),
            "Aggregation pass complete"
        );
        outcome
    }

    fn analyze_one(&self, index: usize, mention: &Mention) -> MentionAnalysis {
        // Blank text is classified Neutral and skips extraction entirely.
        if mention.is_blank() {
            return MentionAnalysis {
                classification: Some(Classification::new(SentimentLabel::Neutral, None)),
                themes: Vec::new(),
                extraction_failed: false,
            };
        }

        let classification = match self.classifier.classify(&mention.text) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!(index, source = %mention.source, "Classification failed, mention excluded: {}", e);
                None
            }
        };

        // A mention without a sentiment has nothing to attribute its themes
        // to, so extraction is skipped for it as well.
        let (themes, extraction_failed) = if classification.is_some() {
            match self.extractor.extract(&mention.text) {
                Ok(themes) => {
                    // Collapse duplicates so one mention can never bump a
                    // theme count twice.
                    let mut unique: Vec<String> = Vec::with_capacity(themes.len());
                    for theme in themes {
                        if !unique.contains(&theme) {
                            unique.push(theme);
                        }
                    }
                    (unique, false)
                }
                Err(e) => {
                    warn!(index, "Theme extraction failed, treating as zero themes: {}", e);
                    (Vec::new(), true)
                }
            }
        } else {
            (Vec::new(), false)
        };

        MentionAnalysis {
            classification,
            themes,
            extraction_failed,
        }
    }
}
