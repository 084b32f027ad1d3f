//! Analysis value object - the result of analyzing one transcript.
//!
//! # Invariants
//!
//! - `completed_criteria` equals the number of satisfied criteria
//! - `progress_percentage`, `stage` and `is_complete` derive from that count
//! - `emergency_detected` implies `severity == Critical`
//!
//! All derived fields are computed in [`Analysis::new`]; deserialization
//! recomputes them rather than trusting the input.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::criteria::{CriteriaSet, Criterion};
use super::progress::{IntakeProgress, Stage};
use super::response::ExtractionResult;
use super::severity::Severity;
use crate::domain::foundation::Percentage;

/// Which extraction path produced an analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// The model-backed extractor.
    Primary,
    /// The deterministic keyword classifier.
    #[default]
    Fallback,
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisSource::Primary => write!(f, "primary"),
            AnalysisSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// What the caller should do next with the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeDecision {
    /// A red flag was found; stop gathering and escalate.
    EscalateEmergency,
    /// All criteria are collected.
    Conclude,
    /// Keep asking, starting with this criterion.
    AskAbout(Criterion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredAnalysis")]
pub struct Analysis {
    criteria: CriteriaSet,
    completed_criteria: u8,
    progress_percentage: Percentage,
    stage: Stage,
    is_complete: bool,
    emergency_detected: bool,
    severity: Severity,
    source: AnalysisSource,
}

impl Analysis {
    /// Builds an analysis, deriving progress and enforcing the emergency rule.
    pub fn new(
        criteria: CriteriaSet,
        emergency_detected: bool,
        severity: Severity,
        source: AnalysisSource,
    ) -> Self {
        let progress = IntakeProgress::from_criteria(&criteria);
        let severity = if emergency_detected {
            Severity::Critical
        } else {
            severity
        };

        Self {
            criteria,
            completed_criteria: progress.completed_count(),
            progress_percentage: progress.percent_complete(),
            stage: progress.stage(),
            is_complete: progress.is_complete(),
            emergency_detected,
            severity,
            source,
        }
    }

    /// Builds an analysis from an extraction result.
    pub fn from_extraction(result: ExtractionResult, source: AnalysisSource) -> Self {
        Self::new(
            result.criteria,
            result.emergency_detected,
            result.severity,
            source,
        )
    }

    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    pub fn completed_criteria(&self) -> u8 {
        self.completed_criteria
    }

    pub fn progress_percentage(&self) -> Percentage {
        self.progress_percentage
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn emergency_detected(&self) -> bool {
        self.emergency_detected
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn source(&self) -> AnalysisSource {
        self.source
    }

    /// Returns the unsatisfied criteria in canonical order.
    pub fn missing_criteria(&self) -> Vec<Criterion> {
        self.criteria.missing()
    }

    /// Decides the caller's next step.
    ///
    /// Emergencies take precedence over completeness.
    pub fn next_step(&self) -> IntakeDecision {
        if self.emergency_detected {
            return IntakeDecision::EscalateEmergency;
        }
        match self.criteria.first_missing() {
            Some(criterion) => IntakeDecision::AskAbout(criterion),
            None => IntakeDecision::Conclude,
        }
    }
}

/// Serialized form accepted on input; derived fields are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnalysis {
    criteria: CriteriaSet,
    emergency_detected: bool,
    severity: Severity,
    #[serde(default)]
    source: AnalysisSource,
}

impl From<StoredAnalysis> for Analysis {
    fn from(stored: StoredAnalysis) -> Self {
        Analysis::new(
            stored.criteria,
            stored.emergency_detected,
            stored.severity,
            stored.source,
        )
    }
}
