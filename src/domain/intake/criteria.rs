//! The seven information categories an intake must collect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One required information category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    PetSpecies,
    PetAge,
    PetConcerns,
    DurationSymptoms,
    EatingDrinking,
    BehavioralChanges,
    MedicalHistory,
}

impl Criterion {
    /// Returns all criteria in canonical order.
    pub fn all() -> &'static [Criterion] {
        &[
            Criterion::PetSpecies,
            Criterion::PetAge,
            Criterion::PetConcerns,
            Criterion::DurationSymptoms,
            Criterion::EatingDrinking,
            Criterion::BehavioralChanges,
            Criterion::MedicalHistory,
        ]
    }

    /// Returns the wire key used in serialized criteria sets.
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::PetSpecies => "petSpecies",
            Criterion::PetAge => "petAge",
            Criterion::PetConcerns => "petConcerns",
            Criterion::DurationSymptoms => "durationSymptoms",
            Criterion::EatingDrinking => "eatingDrinking",
            Criterion::BehavioralChanges => "behavioralChanges",
            Criterion::MedicalHistory => "medicalHistory",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Criterion::PetSpecies => "Pet species",
            Criterion::PetAge => "Pet age",
            Criterion::PetConcerns => "Main concerns",
            Criterion::DurationSymptoms => "Symptom duration",
            Criterion::EatingDrinking => "Eating and drinking",
            Criterion::BehavioralChanges => "Behavioral changes",
            Criterion::MedicalHistory => "Medical history",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which of the seven categories have been collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSet {
    pub pet_species: bool,
    pub pet_age: bool,
    pub pet_concerns: bool,
    pub duration_symptoms: bool,
    pub eating_drinking: bool,
    pub behavioral_changes: bool,
    pub medical_history: bool,
}

impl CriteriaSet {
    /// A set with every criterion satisfied.
    pub const ALL: Self = Self {
        pet_species: true,
        pet_age: true,
        pet_concerns: true,
        duration_symptoms: true,
        eating_drinking: true,
        behavioral_changes: true,
        medical_history: true,
    };

    /// Returns whether a criterion is satisfied.
    pub fn get(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::PetSpecies => self.pet_species,
            Criterion::PetAge => self.pet_age,
            Criterion::PetConcerns => self.pet_concerns,
            Criterion::DurationSymptoms => self.duration_symptoms,
            Criterion::EatingDrinking => self.eating_drinking,
            Criterion::BehavioralChanges => self.behavioral_changes,
            Criterion::MedicalHistory => self.medical_history,
        }
    }

    /// Sets a criterion.
    pub fn set(&mut self, criterion: Criterion, value: bool) {
        let slot = match criterion {
            Criterion::PetSpecies => &mut self.pet_species,
            Criterion::PetAge => &mut self.pet_age,
            Criterion::PetConcerns => &mut self.pet_concerns,
            Criterion::DurationSymptoms => &mut self.duration_symptoms,
            Criterion::EatingDrinking => &mut self.eating_drinking,
            Criterion::BehavioralChanges => &mut self.behavioral_changes,
            Criterion::MedicalHistory => &mut self.medical_history,
        };
        *slot = value;
    }

    /// Returns the number of satisfied criteria (0..=7).
    pub fn completed_count(&self) -> u8 {
        Criterion::all().iter().filter(|c| self.get(**c)).count() as u8
    }

    /// Returns the unsatisfied criteria in canonical order.
    pub fn missing(&self) -> Vec<Criterion> {
        Criterion::all()
            .iter()
            .filter(|c| !self.get(**c))
            .copied()
            .collect()
    }

    /// Returns the first unsatisfied criterion in canonical order.
    pub fn first_missing(&self) -> Option<Criterion> {
        Criterion::all().iter().find(|c| !self.get(**c)).copied()
    }
}
