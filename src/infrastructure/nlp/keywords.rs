//! Lexicon-based theme extraction.
//!
//! Each lexicon entry maps a canonical theme to the keywords that signal
//! it. A mention's themes are the entries with at least one keyword hit,
//! ranked by hit count and capped at `top_n`. Lexicon order is the
//! tie-break, so the lexicon must stay an ordered list, not a map.

use crate::domain::errors::ExtractError;
use crate::domain::ports::ThemeExtractor;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LexiconEntry {
    pub theme: String,
    pub keywords: Vec<String>,
}

const DEFAULT_LEXICON: &[(&str, &[&str])] = &[
    ("design", &["design", "sleek", "beautiful", "gorgeous", "stunning", "looks", "screen"]),
    ("battery", &["battery", "charging", "charge", "drains", "power"]),
    ("shipping", &["shipping", "delivery", "arrive", "arrived", "waiting", "delay", "delays"]),
    ("price", &["price", "overpriced", "expensive", "cost", "worth", "refund"]),
    ("performance", &["slow", "lag", "lagging", "heating", "overheating", "crash", "restarting", "update"]),
    ("support", &["support", "customer service", "warranty", "helpdesk"]),
    ("build quality", &["broke", "broken", "cheap", "materials", "defective", "strap"]),
];

pub struct KeywordThemeExtractor {
    lexicon: Vec<LexiconEntry>,
    top_n: usize,
}

impl KeywordThemeExtractor {
    /// Built-in consumer-product lexicon.
    pub fn new(top_n: usize) -> Self {
        let lexicon = DEFAULT_LEXICON
            .iter()
            .map(|(theme, keywords)| LexiconEntry {
                theme: theme.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self::with_lexicon(lexicon, top_n)
    }

    /// Custom lexicon, e.g. loaded from a TOML profile. Theme names are
    /// canonicalized to lowercase + trim; duplicate names keep the first
    /// entry so ordering semantics stay stable.
    pub fn with_lexicon(lexicon: Vec<LexiconEntry>, top_n: usize) -> Self {
        let mut canonical: Vec<LexiconEntry> = Vec::with_capacity(lexicon.len());
        for mut entry in lexicon {
            entry.theme = entry.theme.trim().to_lowercase();
            entry
                .keywords
                .iter_mut()
                .for_each(|k| *k = k.trim().to_lowercase());
            if !entry.theme.is_empty() && !canonical.iter().any(|e| e.theme == entry.theme) {
                canonical.push(entry);
            }
        }
        Self {
            lexicon: canonical,
            top_n,
        }
    }
}

impl ThemeExtractor for KeywordThemeExtractor {
    fn extract(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        let text_lower = text.to_lowercase();
        if text_lower.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(&LexiconEntry, usize)> = self
            .lexicon
            .iter()
            .filter_map(|entry| {
                let hits = entry
                    .keywords
                    .iter()
                    .filter(|k| text_lower.contains(k.as_str()))
                    .count();
                (hits > 0).then_some((entry, hits))
            })
            .collect();

        // Stable sort: lexicon order breaks hit-count ties.
        scored.sort_by_key(|(_, hits)| std::cmp::Reverse(*hits));

        Ok(scored
            .into_iter()
            .take(self.top_n)
            .map(|(entry, _)| entry.theme.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_matching_themes() {
        let extractor = KeywordThemeExtractor::new(2);
        let themes = extractor
            .extract("The battery life sucks. Needs charging all the time!")
            .unwrap();
        assert_eq!(themes, vec!["battery"]);
    }

    #[test]
    fn test_top_n_caps_and_ranks_by_hits() {
        let extractor = KeywordThemeExtractor::new(1);
        // battery: 2 hits (battery, charging); design: 1 hit (sleek)
        let themes = extractor
            .extract("Sleek, but the battery needs charging twice a day")
            .unwrap();
        assert_eq!(themes, vec!["battery"]);
    }

    #[test]
    fn test_lexicon_order_breaks_ties() {
        let extractor = KeywordThemeExtractor::new(2);
        // One hit each: design ("design") precedes price ("expensive").
        let themes = extractor.extract("Nice design but expensive").unwrap();
        assert_eq!(themes, vec!["design", "price"]);
    }

    #[test]
    fn test_no_hits_is_empty() {
        let extractor = KeywordThemeExtractor::new(2);
        assert!(extractor.extract("completely unrelated text").unwrap().is_empty());
        assert!(extractor.extract("   ").unwrap().is_empty());
    }

    #[test]
    fn test_custom_lexicon_is_canonicalized() {
        let extractor = KeywordThemeExtractor::with_lexicon(
            vec![
                LexiconEntry {
                    theme: "  Comfort ".to_string(),
                    keywords: vec!["HEAVY".to_string(), "strap".to_string()],
                },
                LexiconEntry {
                    theme: "comfort".to_string(),
                    keywords: vec!["ignored duplicate".to_string()],
                },
            ],
            2,
        );

        let themes = extractor.extract("Way too heavy for long sessions").unwrap();
        assert_eq!(themes, vec!["comfort"]);
    }
}
