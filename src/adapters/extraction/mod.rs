//! Criteria extraction adapters.
//!
//! Implementations of the `CriteriaExtractor` port.

mod llm_criteria_extractor;

pub use llm_criteria_extractor::{LlmCriteriaExtractor, EXTRACTION_MAX_TOKENS};
