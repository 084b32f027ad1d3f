//! Intake module - conversational pet-health intake analysis.
//!
//! Decides which of seven intake facts a conversation has collected, whether
//! it contains an emergency red flag, how severe the case is, and how far
//! along the intake is.
//!
//! Everything here is pure: no I/O and no shared mutable state. The
//! model-backed extractor lives in the adapters layer and talks to this
//! module only through [`prompt`] and [`response`].

mod analysis;
mod criteria;
mod emergency;
mod fallback;
mod lexicon;
mod message;
mod progress;
pub mod prompt;
pub mod response;
mod severity;
mod transcript;
mod vocabulary;

pub use analysis::{Analysis, AnalysisSource, IntakeDecision};
pub use criteria::{CriteriaSet, Criterion};
pub use emergency::EmergencyDetector;
pub use fallback::FallbackExtractor;
pub use lexicon::{normalize_text, Lexicon, TermMatcher};
pub use message::{Message, RawMessage, Role, Transcript};
pub use progress::{IntakeProgress, Stage};
pub use response::{ExtractionResult, ResponseParseError};
pub use severity::{Severity, SeverityClassifier};
pub use transcript::{TranscriptView, Turn};
pub use vocabulary::{TermList, Vocabulary, VocabularyError};
