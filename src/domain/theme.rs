use crate::domain::sentiment::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Aggregate record for one theme across a run.
///
/// `dominant_sentiment` is last-write-wins: each recurrence of the theme
/// overwrites it with the sentiment of the mention that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub dominant_sentiment: SentimentLabel,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub name: String,
    pub record: ThemeRecord,
}

/// Theme table preserving first-seen insertion order.
///
/// Insertion order is load-bearing: top-theme selection breaks count ties
/// by first-seen order, so the table must never reorder entries. Theme
/// names are compared exactly as produced by the extractor (extractors
/// canonicalize to lowercase + trim).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeTable {
    entries: Vec<ThemeEntry>,
}

impl ThemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `theme` carrying `sentiment`.
    pub fn observe(&mut self, theme: &str, sentiment: SentimentLabel) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == theme) {
            entry.record.count += 1;
            entry.record.dominant_sentiment = sentiment;
        } else {
            self.entries.push(ThemeEntry {
                name: theme.to_string(),
                record: ThemeRecord {
                    dominant_sentiment: sentiment,
                    count: 1,
                },
            });
        }
    }

    pub fn get(&self, theme: &str) -> Option<&ThemeRecord> {
        self.entries
            .iter()
            .find(|e| e.name == theme)
            .map(|e| &e.record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The theme with the highest count; ties resolve to the first-seen theme.
    pub fn top_theme(&self) -> Option<&str> {
        let mut best: Option<&ThemeEntry> = None;
        for entry in &self.entries {
            match best {
                Some(current) if entry.record.count <= current.record.count => {}
                _ => best = Some(entry),
            }
        }
        best.map(|e| e.name.as_str())
    }

    /// Top `k` themes by count, stable by insertion order on equal counts.
    pub fn top_themes(&self, k: usize) -> Vec<&str> {
        let mut ranked: Vec<&ThemeEntry> = self.entries.iter().collect();
        // Stable sort keeps insertion order within equal counts.
        ranked.sort_by_key(|e| std::cmp::Reverse(e.record.count));
        ranked.into_iter().take(k).map(|e| e.name.as_str()).collect()
    }

    /// One-line rendering, e.g. "battery (negative, 2); design (positive, 1)".
    pub fn summary_line(&self) -> String {
        if self.entries.is_empty() {
            return "none".to_string();
        }
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{} ({}, {})",
                    e.name, e.record.dominant_sentiment, e.record.count
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Compact serialization for the flat run record: "name:sentiment:count;...".
    pub fn flat_record(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "{}:{}:{}",
                    e.name, e.record.dominant_sentiment, e.record.count
                )
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}
