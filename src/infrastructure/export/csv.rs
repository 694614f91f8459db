//! Flat per-run record export.
//!
//! One CSV row per analysis run, appended so consecutive runs build a
//! session log. The record is a lossless flattening of `AnalysisReport`.

use crate::application::pipeline::AnalysisReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub run_id: String,
    pub subject: String,
    pub timestamp: String,
    pub mentions: usize,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    /// "theme:sentiment:count" triplets joined with ';'
    pub themes: String,
    pub recommendation: String,
    pub tweet: String,
    pub enhanced: bool,
}

impl RunRecord {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            run_id: report.run_id.to_string(),
            subject: report.subject.clone(),
            timestamp: report.started_at.to_rfc3339(),
            mentions: report.mentions_total,
            positive: report.histogram.positive,
            negative: report.histogram.negative,
            neutral: report.histogram.neutral,
            themes: report.themes.flat_record(),
            recommendation: report.strategy.recommendation.clone(),
            tweet: report.strategy.tweet.clone(),
            enhanced: report.enhanced,
        }
    }
}

pub struct CsvRunExporter {
    path: PathBuf,
}

impl CsvRunExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append one record, writing the header only when the file is new.
    pub fn append(&self, record: &RunRecord) -> Result<()> {
        let write_header = !self.path.exists()
            || std::fs::metadata(&self.path)
                .map(|m| m.len() == 0)
                .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open export file {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(record).context("failed to write run record")?;
        writer.flush().context("failed to flush run record")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::{SentimentHistogram, SentimentLabel};
    use crate::domain::strategy::StrategyResult;
    use crate::domain::theme::ThemeTable;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_report() -> AnalysisReport {
        let mut themes = ThemeTable::new();
        themes.observe("battery", SentimentLabel::Negative);
        themes.observe("battery", SentimentLabel::Negative);

        AnalysisReport {
            run_id: Uuid::new_v4(),
            subject: "Vision Pro".to_string(),
            started_at: Utc::now(),
            mentions_total: 5,
            histogram: SentimentHistogram {
                positive: 1,
                negative: 3,
                neutral: 1,
            },
            themes,
            strategy: StrategyResult {
                recommendation: "Address concerns".to_string(),
                tweet: "We hear you".to_string(),
            },
            enhanced: false,
            warnings: vec![],
        }
    }

    #[test]
    fn test_record_flattens_report_without_loss() {
        let report = sample_report();
        let record = RunRecord::from_report(&report);

        assert_eq!(record.subject, "Vision Pro");
        assert_eq!(record.negative, 3);
        assert_eq!(record.themes, "battery:negative:2");
        assert_eq!(record.run_id, report.run_id.to_string());
    }

    #[test]
    fn test_append_writes_header_once() {
        let path = std::env::temp_dir().join(format!("brandlens-test-{}.csv", Uuid::new_v4()));
        let exporter = CsvRunExporter::new(&path);

        let record = RunRecord::from_report(&sample_report());
        exporter.append(&record).unwrap();
        exporter.append(&record).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header_lines = contents
            .lines()
            .filter(|l| l.starts_with("run_id,"))
            .count();
        assert_eq!(header_lines, 1);
        assert_eq!(contents.lines().count(), 3);

        std::fs::remove_file(&path).ok();
    }
}
