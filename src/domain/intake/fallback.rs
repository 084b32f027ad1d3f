//! FallbackExtractor - deterministic keyword classifier.
//!
//! Used whenever the model-backed extractor is not configured, fails or
//! times out. Performs no I/O and cannot fail.
//!
//! Six criteria are matched against the whole conversation, so a terse
//! "yes" to "is your dog eating?" covers species and appetite. The behavior
//! rule is the exception and is scoped to user turns:
//!
//! - a user message mentioning behavior vocabulary satisfies it outright
//! - a short acknowledgement ("no", "same as usual") satisfies it only when
//!   an earlier assistant turn asked about behavior or activity

use std::sync::Arc;

use super::criteria::CriteriaSet;
use super::emergency::EmergencyDetector;
use super::lexicon::Lexicon;
use super::message::Role;
use super::response::ExtractionResult;
use super::severity::SeverityClassifier;
use super::transcript::TranscriptView;

#[derive(Debug, Clone)]
pub struct FallbackExtractor {
    lexicon: Arc<Lexicon>,
    emergency: EmergencyDetector,
    severity: SeverityClassifier,
}

impl FallbackExtractor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            emergency: EmergencyDetector::new(Arc::clone(&lexicon)),
            severity: SeverityClassifier::new(Arc::clone(&lexicon)),
            lexicon,
        }
    }

    /// Classifies criteria, emergency and severity for a transcript.
    pub fn extract(&self, view: &TranscriptView) -> ExtractionResult {
        let emergency_detected = self.emergency.detect(view);
        ExtractionResult {
            criteria: self.criteria(view),
            emergency_detected,
            severity: self.severity.classify(view.all_content(), emergency_detected),
        }
    }

    /// Classifies only the seven criteria.
    pub fn criteria(&self, view: &TranscriptView) -> CriteriaSet {
        let all_content = view.all_content();
        let lexicon = &self.lexicon;

        CriteriaSet {
            pet_species: lexicon.species.is_match(all_content),
            pet_age: lexicon.age.is_match(all_content),
            pet_concerns: lexicon.concerns.is_match(all_content),
            duration_symptoms: lexicon.duration.is_match(all_content),
            eating_drinking: lexicon.eating_drinking.is_match(all_content),
            behavioral_changes: self.behavior_answered(view),
            medical_history: lexicon.medical_history.is_match(all_content),
        }
    }

    fn behavior_answered(&self, view: &TranscriptView) -> bool {
        let mut asked_about_behavior = false;

        for turn in view.turns() {
            match turn.role {
                Role::Assistant => {
                    if self.lexicon.behavior_topics.is_match(&turn.text) {
                        asked_about_behavior = true;
                    }
                }
                Role::User => {
                    if self.lexicon.behavior.is_match(&turn.text) {
                        return true;
                    }
                    if asked_about_behavior && self.lexicon.is_acknowledgement(&turn.text) {
                        return true;
                    }
                }
            }
        }

        false
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}
