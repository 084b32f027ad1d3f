//! IntakeProgress value object - completion tracking for an intake.
//!
//! Derived entirely from the criteria set: the count of satisfied criteria
//! decides the percentage, the stage, and whether the intake can conclude.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::criteria::{CriteriaSet, Criterion};
use crate::domain::foundation::Percentage;

/// Coarse phase of an intake conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Getting Started")]
    GettingStarted,
    #[serde(rename = "Initial Assessment")]
    InitialAssessment,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Finalizing")]
    Finalizing,
    #[serde(rename = "Complete")]
    Complete,
}

impl Stage {
    /// Maps a completed-criteria count to its stage.
    pub fn for_count(completed: u8) -> Self {
        match completed {
            0 => Stage::GettingStarted,
            1..=2 => Stage::InitialAssessment,
            3..=4 => Stage::InProgress,
            5..=6 => Stage::Finalizing,
            _ => Stage::Complete,
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::GettingStarted => "Getting Started",
            Stage::InitialAssessment => "Initial Assessment",
            Stage::InProgress => "In Progress",
            Stage::Finalizing => "Finalizing",
            Stage::Complete => "Complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A snapshot of intake progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeProgress {
    completed: u8,
}

impl IntakeProgress {
    /// Computes progress for a criteria set.
    pub fn from_criteria(criteria: &CriteriaSet) -> Self {
        Self {
            completed: criteria.completed_count(),
        }
    }

    /// Returns the number of completed criteria.
    pub fn completed_count(&self) -> u8 {
        self.completed
    }

    /// Returns the total number of criteria.
    pub fn required_count(&self) -> u8 {
        Criterion::all().len() as u8
    }

    /// Returns `round(completed / 7 * 100)`.
    pub fn percent_complete(&self) -> Percentage {
        Percentage::of(u32::from(self.completed), u32::from(self.required_count()))
    }

    pub fn stage(&self) -> Stage {
        Stage::for_count(self.completed)
    }

    /// Returns true if every criterion is collected.
    pub fn is_complete(&self) -> bool {
        self.completed == self.required_count()
    }
}
