//! Red-flag detection over the whole conversation.

use std::sync::Arc;

use super::lexicon::Lexicon;
use super::transcript::TranscriptView;

/// Detects emergency red flags in transcript text.
///
/// Scans every message, assistant turns included, so an emergency the
/// assistant restates is still caught.
#[derive(Debug, Clone)]
pub struct EmergencyDetector {
    lexicon: Arc<Lexicon>,
}

impl EmergencyDetector {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Returns true if any red-flag phrase occurs in the transcript.
    pub fn detect(&self, view: &TranscriptView) -> bool {
        self.detect_text(view.all_content())
    }

    /// Returns true if any red-flag phrase occurs in already-normalized text.
    pub fn detect_text(&self, text: &str) -> bool {
        self.lexicon.emergency.is_match(text)
    }
}

impl Default for EmergencyDetector {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}
