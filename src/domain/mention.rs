use serde::{Deserialize, Serialize};

/// One unit of text attributed to the subject under analysis.
///
/// Mentions are ephemeral: they carry no persistent identity and are
/// consumed exactly once per analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub text: String,
    pub source: String,
}

impl Mention {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }

    /// Whitespace-only mentions still count toward the histogram but can
    /// never contribute themes.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
