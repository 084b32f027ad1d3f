//! Keyword vocabulary for deterministic intake classification.
//!
//! Every word list and phrase set used by the fallback extractor, the emergency
//! detector and the severity classifier lives here as data. The built-in
//! defaults can be overridden section by section from a YAML file:
//!
//! ```yaml
//! species:
//!   terms: [dog, cat, alpaca]
//! max_acknowledgement_words: 4
//! ```
//!
//! # Term syntax
//!
//! - `dog` matches the whole word, with an optional plural (`dogs`)
//! - `vomit*` matches any word starting with the stem (`vomiting`, `vomited`)
//! - `hit by car` matches the phrase with any whitespace between words
//!
//! Matching is case-insensitive. `patterns` entries are raw regular
//! expressions for shapes a word list cannot express (numeric ages, durations).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or compiling a vocabulary.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse vocabulary: {0}")]
    Parse(String),

    #[error("Invalid pattern in '{list}': {reason}")]
    InvalidPattern { list: String, reason: String },

    #[error("max_acknowledgement_words must be between 1 and 20, got {0}")]
    InvalidAcknowledgementLimit(usize),
}

/// A list of terms plus optional raw regex patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermList {
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl TermList {
    /// Builds a term list from string literals.
    pub fn of(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            patterns: Vec::new(),
        }
    }

    /// Adds raw regex patterns.
    pub fn with_patterns(mut self, patterns: &[&str]) -> Self {
        self.patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Returns true if neither terms nor patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.patterns.is_empty()
    }
}

/// Complete vocabulary driving deterministic classification.
///
/// Missing sections in an override file keep their built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Species and life-stage words.
    pub species: TermList,
    /// Numeric ages and life-stage words.
    pub age: TermList,
    /// Symptoms and illness words.
    pub concerns: TermList,
    /// Time spans and onset words.
    pub duration: TermList,
    /// Appetite and intake words.
    pub eating_drinking: TermList,
    /// Medication, condition and vet-visit words.
    pub medical_history: TermList,
    /// Behavior words that count when the user says them.
    pub behavior: TermList,
    /// Words that mark an assistant turn as asking about behavior.
    pub behavior_topics: TermList,
    /// Phrases that make a short user reply an acknowledgement.
    pub acknowledgements: TermList,
    /// Whole-message replies that are acknowledgements on their own ("no", "yes").
    pub terse_replies: Vec<String>,
    /// Upper bound on words for a reply to count as a short acknowledgement.
    pub max_acknowledgement_words: usize,
    /// Red-flag phrases forcing an emergency.
    pub emergency: TermList,
    /// Words escalating severity to urgent.
    pub escalation: TermList,
    /// Words lowering severity to routine.
    pub minimizing: TermList,
}

const SMALL_NUMBER_WORDS: &str =
    "a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|few|several|couple(?:\\s+of)?";

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            species: TermList::of(&[
                "dog", "cat", "rabbit", "bunny", "bird", "parrot", "budgie", "hamster",
                "guinea pig", "ferret", "reptile", "snake", "lizard", "gecko", "turtle",
                "tortoise", "fish", "puppy", "puppies", "kitten",
            ]),
            age: TermList::of(&[
                "old", "age", "aged", "puppy", "puppies", "kitten", "senior", "young",
                "adult", "elderly", "baby",
            ])
            .with_patterns(&[
                r"\b\d+(?:\.\d+)?\s*-?\s*(?:years?|yrs?|y/o|yo)\b",
                r"\b\d+(?:\.\d+)?\s*-?\s*(?:months?|mos?|weeks?|wks?)\s*-?\s*old\b",
                r"\b(?:a|an|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen)\s*-?\s*(?:years?|months?|weeks?)\s*-?\s*old\b",
            ]),
            concerns: TermList::of(&[
                "symptom*", "sick*", "ill", "unwell", "problem*", "concern*", "issue*",
                "vomit*", "throwing up", "threw up", "diarrh*", "cough*", "sneez*", "lump*",
                "limp*", "pain*", "bleed*", "itch*", "scratch*", "rash*", "swell*",
                "swollen", "wound*", "injur*", "hurt*", "discharge", "fever*", "infect*",
            ]),
            duration: TermList::of(&[
                "since", "started", "starting", "began", "begun", "ongoing", "recently",
                "recent", "yesterday", "today", "tonight", "just now", "last night",
                "this morning", "overnight", "for a while",
            ])
            .with_patterns(&[&format!(
                r"\b(?:\d+|{})\s+(?:minutes?|mins?|hours?|hrs?|days?|nights?|weeks?|months?)\b",
                SMALL_NUMBER_WORDS
            )]),
            eating_drinking: TermList::of(&[
                "eat*", "ate", "drink*", "drank", "food*", "water", "appetite", "hungry",
                "hunger", "thirst*", "meal*", "fed", "feed*", "kibble",
            ]),
            medical_history: TermList::of(&[
                "medicine*", "medication*", "meds", "condition*", "surgery", "surgeries",
                "surgical", "illness*", "vet", "veterinar*", "vaccin*", "allerg*",
                "diagnos*", "treatment*", "treated", "chronic", "prescri*", "shots",
                "spayed", "neutered",
            ]),
            behavior: TermList::of(&[
                "behavio*", "activit*", "active", "lethargic", "lethargy", "hiding", "hides",
                "normal", "energetic", "energy", "playful", "withdrawn", "acting", "restless",
                "aggressive", "sluggish", "tired", "sleeping more", "mood", "clingy",
                "depressed",
            ]),
            behavior_topics: TermList::of(&[
                "behavio*", "activit*", "active", "energy", "energetic", "routine", "acting",
                "lethargic", "playful", "mood", "temperament",
            ]),
            acknowledgements: TermList::of(&[
                "no changes", "no change", "same", "normal", "usual", "fine", "none",
                "nothing", "nope", "not really", "no behavioral", "no behavioural",
            ]),
            terse_replies: [
                "no", "nope", "nah", "not really", "none", "nothing", "yes", "yeah", "yep",
                "yup", "same", "fine", "normal", "ok", "okay",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_acknowledgement_words: 6,
            emergency: TermList::of(&[
                "can't breathe", "cant breathe", "cannot breathe", "can not breathe",
                "not breathing", "stopped breathing", "chok*", "seizure*", "seizing",
                "collaps*", "unconscious", "severe bleeding", "bleeding heavily",
                "hit by car", "hit by a car", "poison*", "toxic", "bloat*",
                "can't urinate", "cant urinate", "cannot urinate", "can't pee",
                "extreme pain", "pale gums", "blue tongue", "blue gums",
                "distended abdomen",
            ]),
            escalation: TermList::of(&[
                "severe*", "extreme*", "emergenc*", "urgent*", "serious*", "critical*",
            ]),
            minimizing: TermList::of(&["mild*", "minor", "slight*", "small"]),
        }
    }
}

impl Vocabulary {
    /// Parses a vocabulary from YAML; omitted sections keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Self =
            serde_yaml::from_str(yaml).map_err(|e| VocabularyError::Parse(e.to_string()))?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Loads a vocabulary override from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| VocabularyError::Io {
            path: path.as_ref().display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml_str(&content)
    }

    /// Checks limits that the YAML schema cannot express.
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if !(1..=20).contains(&self.max_acknowledgement_words) {
            return Err(VocabularyError::InvalidAcknowledgementLimit(
                self.max_acknowledgement_words,
            ));
        }
        Ok(())
    }
}
