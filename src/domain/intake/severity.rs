//! Case severity levels and their deterministic classifier.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;
use crate::domain::foundation::{DomainError, ErrorCode};

/// How urgently a case needs veterinary attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Urgent,
    Moderate,
    Routine,
}

impl Severity {
    /// Returns the label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Urgent => "Urgent",
            Severity::Moderate => "Moderate",
            Severity::Routine => "Routine",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    /// Parses a severity label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "urgent" => Ok(Severity::Urgent),
            "moderate" => Ok(Severity::Moderate),
            "routine" => Ok(Severity::Routine),
            other => Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown severity '{}'", other),
            )
            .with_detail("field", "severity")),
        }
    }
}

/// Classifies severity from conversation text.
///
/// Emergency wins over everything; escalation words win over minimizing
/// words; with neither present the case is moderate.
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    lexicon: Arc<Lexicon>,
}

impl SeverityClassifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Classifies normalized `all_content`.
    pub fn classify(&self, all_content: &str, emergency: bool) -> Severity {
        if emergency {
            Severity::Critical
        } else if self.lexicon.escalation.is_match(all_content) {
            Severity::Urgent
        } else if self.lexicon.minimizing.is_match(all_content) {
            Severity::Routine
        } else {
            Severity::Moderate
        }
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}
