//! Session-scoped feedback on analysis runs.
//!
//! The log is owned by the caller (CLI session, embedding UI) and lives
//! exactly as long as that session. It is never process-global state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackVerdict {
    Agree,
    Revise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub run_id: Uuid,
    pub subject: String,
    pub verdict: FeedbackVerdict,
    pub revision_focus: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackLog {
    entries: Vec<FeedbackEntry>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_feedback(
        &mut self,
        run_id: Uuid,
        subject: &str,
        verdict: FeedbackVerdict,
        revision_focus: Option<String>,
    ) {
        self.entries.push(FeedbackEntry {
            run_id,
            subject: subject.to_string(),
            verdict,
            revision_focus,
            recorded_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn for_run(&self, run_id: Uuid) -> Vec<&FeedbackEntry> {
        self.entries.iter().filter(|e| e.run_id == run_id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_lookup_by_run() {
        let mut log = FeedbackLog::new();
        let run_a = Uuid::new_v4();
        let run_b = Uuid::new_v4();

        log.append_feedback(run_a, "Vision Pro", FeedbackVerdict::Agree, None);
        log.append_feedback(
            run_b,
            "Vision Pro",
            FeedbackVerdict::Revise,
            Some("battery".to_string()),
        );

        assert_eq!(log.len(), 2);
        assert_eq!(log.for_run(run_a).len(), 1);
        let revised = log.for_run(run_b);
        assert_eq!(revised[0].verdict, FeedbackVerdict::Revise);
        assert_eq!(revised[0].revision_focus.as_deref(), Some("battery"));
    }
}
