//! Pet Intake - Conversational intake analysis for pet-health triage
//!
//! Given the transcript of a conversation between a pet owner and a triage
//! assistant, this crate decides which of seven intake criteria have been
//! covered, whether the conversation describes an emergency, and how severe
//! the case appears.
//!
//! A model-backed extractor is tried first under a bounded timeout; a
//! deterministic keyword classifier takes over whenever it is unavailable,
//! slow or returns an unusable reply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use application::AnalysisOrchestrator;
pub use domain::intake::{Analysis, AnalysisSource, IntakeDecision, RawMessage, Transcript};
