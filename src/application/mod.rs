//! Application layer - Use cases over the intake domain.
//!
//! The orchestrator coordinates the primary extraction port with the
//! deterministic fallback and always produces an `Analysis`.

mod orchestrator;

pub use orchestrator::{AnalysisOrchestrator, DEFAULT_PRIMARY_TIMEOUT};
