//! Normalized text views over a transcript.
//!
//! Classification rules never look at raw message content. They read these
//! lowercase, quote-folded views instead, which keeps every predicate
//! independent of capitalization and typographic apostrophes.

use super::lexicon::normalize_text;
use super::message::{Role, Transcript};

/// One normalized conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Normalized, read-only projection of a [`Transcript`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptView {
    turns: Vec<Turn>,
    all_content: String,
}

impl TranscriptView {
    /// Builds the view for a transcript.
    pub fn new(transcript: &Transcript) -> Self {
        let turns: Vec<Turn> = transcript
            .messages()
            .iter()
            .map(|msg| Turn {
                role: msg.role(),
                text: normalize_text(msg.content()),
            })
            .collect();

        let all_content = turns
            .iter()
            .map(|turn| turn.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self { turns, all_content }
    }

    /// Every message, user and assistant, joined in order.
    pub fn all_content(&self) -> &str {
        &self.all_content
    }

    /// Normalized turns in conversation order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}
