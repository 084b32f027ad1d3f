//! Compiled form of a [`Vocabulary`].
//!
//! Each term list compiles into a single case-insensitive regex. Compilation
//! happens once, at startup or on first use of the built-in vocabulary.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::vocabulary::{TermList, Vocabulary, VocabularyError};

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(
        Lexicon::compile(&Vocabulary::default()).expect("Invalid built-in vocabulary pattern"),
    )
});

/// Matcher for one term list.
///
/// An empty list never matches.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    regex: Option<Regex>,
}

impl TermMatcher {
    /// Compiles a term list; `list_name` is used in error messages.
    pub fn compile(list: &TermList, list_name: &str) -> Result<Self, VocabularyError> {
        let mut alternatives: Vec<String> = list
            .terms
            .iter()
            .filter_map(|term| term_to_pattern(term))
            .collect();

        for pattern in &list.patterns {
            // Validate each raw pattern on its own so the error names it.
            Regex::new(pattern).map_err(|e| VocabularyError::InvalidPattern {
                list: list_name.to_string(),
                reason: e.to_string(),
            })?;
            alternatives.push(format!("(?:{})", pattern));
        }

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        let combined = format!("(?i){}", alternatives.join("|"));
        let regex = Regex::new(&combined).map_err(|e| VocabularyError::InvalidPattern {
            list: list_name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { regex: Some(regex) })
    }

    /// Returns true if any term or pattern occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Converts one vocabulary term into a regex fragment.
///
/// `stem*` becomes a word-prefix match; a plain term matches the whole word
/// with an optional plural. Inner whitespace matches any run of whitespace.
fn term_to_pattern(term: &str) -> Option<String> {
    let term = normalize_text(term.trim());
    let (body, is_stem) = match term.strip_suffix('*') {
        Some(stem) => (stem.trim_end().to_string(), true),
        None => (term, false),
    };
    if body.is_empty() {
        return None;
    }

    let escaped = body
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    let starts_word = body.chars().next().is_some_and(is_word_char);
    let ends_word = body.chars().last().is_some_and(is_word_char);

    let mut pattern = String::with_capacity(escaped.len() + 16);
    if starts_word {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&escaped);
    if !is_stem && ends_word {
        pattern.push_str(r"(?:s|es)?\b");
    }

    Some(format!("(?:{})", pattern))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases text and folds typographic quotes to their ASCII forms.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// All compiled matchers of a vocabulary.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub species: TermMatcher,
    pub age: TermMatcher,
    pub concerns: TermMatcher,
    pub duration: TermMatcher,
    pub eating_drinking: TermMatcher,
    pub medical_history: TermMatcher,
    pub behavior: TermMatcher,
    pub behavior_topics: TermMatcher,
    pub acknowledgements: TermMatcher,
    pub emergency: TermMatcher,
    pub escalation: TermMatcher,
    pub minimizing: TermMatcher,
    terse_replies: HashSet<String>,
    max_acknowledgement_words: usize,
}

impl Lexicon {
    /// Compiles every list of `vocabulary`.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern` naming the first list whose regex does not compile
    /// - `InvalidAcknowledgementLimit` if the word limit is out of range
    pub fn compile(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        vocabulary.validate()?;

        Ok(Self {
            species: TermMatcher::compile(&vocabulary.species, "species")?,
            age: TermMatcher::compile(&vocabulary.age, "age")?,
            concerns: TermMatcher::compile(&vocabulary.concerns, "concerns")?,
            duration: TermMatcher::compile(&vocabulary.duration, "duration")?,
            eating_drinking: TermMatcher::compile(
                &vocabulary.eating_drinking,
                "eating_drinking",
            )?,
            medical_history: TermMatcher::compile(
                &vocabulary.medical_history,
                "medical_history",
            )?,
            behavior: TermMatcher::compile(&vocabulary.behavior, "behavior")?,
            behavior_topics: TermMatcher::compile(
                &vocabulary.behavior_topics,
                "behavior_topics",
            )?,
            acknowledgements: TermMatcher::compile(
                &vocabulary.acknowledgements,
                "acknowledgements",
            )?,
            emergency: TermMatcher::compile(&vocabulary.emergency, "emergency")?,
            escalation: TermMatcher::compile(&vocabulary.escalation, "escalation")?,
            minimizing: TermMatcher::compile(&vocabulary.minimizing, "minimizing")?,
            terse_replies: vocabulary
                .terse_replies
                .iter()
                .map(|reply| strip_punctuation(&normalize_text(reply)))
                .filter(|reply| !reply.is_empty())
                .collect(),
            max_acknowledgement_words: vocabulary.max_acknowledgement_words,
        })
    }

    /// Returns the shared lexicon compiled from the built-in vocabulary.
    pub fn builtin() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Returns true if `text` is a short acknowledgement.
    ///
    /// A reply qualifies when it has at most `max_acknowledgement_words`
    /// words and either is a terse reply on its own ("no", "yep") or
    /// contains an acknowledgement phrase ("no changes", "same as usual").
    pub fn is_acknowledgement(&self, text: &str) -> bool {
        let cleaned = strip_punctuation(&normalize_text(text));
        let words = cleaned.split_whitespace().count();
        if words == 0 || words > self.max_acknowledgement_words {
            return false;
        }

        self.terse_replies.contains(&cleaned) || self.acknowledgements.is_match(&cleaned)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        BUILTIN.as_ref().clone()
    }
}

/// Removes punctuation other than apostrophes and collapses whitespace.
fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(terms: &[&str]) -> TermMatcher {
        TermMatcher::compile(&TermList::of(terms), "test").unwrap()
    }

    #[test]
    fn plain_term_matches_whole_word_and_plural() {
        let m = matcher(&["cat"]);
        assert!(m.is_match("my cat is sick"));
        assert!(m.is_match("two cats"));
        assert!(!m.is_match("she will catch it"));
        assert!(!m.is_match("category"));
    }

    #[test]
    fn stem_term_matches_word_prefix() {
        let m = matcher(&["vomit*"]);
        assert!(m.is_match("he keeps vomiting"));
        assert!(m.is_match("vomited twice"));
        assert!(!m.is_match("antivomit"));
    }

    #[test]
    fn stem_requires_leading_word_boundary() {
        let m = matcher(&["eat*"]);
        assert!(m.is_match("not eating"));
        assert!(!m.is_match("great day"));
    }

    #[test]
    fn phrase_tolerates_extra_whitespace() {
        let m = matcher(&["hit by car"]);
        assert!(m.is_match("she was hit  by\ncar"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let m = matcher(&["seizure*"]);
        assert!(m.is_match("SEIZURES last night"));
    }

    #[test]
    fn apostrophe_term_matches_curly_quotes_after_normalization() {
        let m = matcher(&["can't breathe"]);
        assert!(m.is_match(&normalize_text("He can\u{2019}t breathe")));
    }

    #[test]
    fn empty_list_never_matches() {
        let m = TermMatcher::compile(&TermList::default(), "empty").unwrap();
        assert!(!m.is_match("anything at all"));
    }

    #[test]
    fn raw_patterns_are_included() {
        let list = TermList::default().with_patterns(&[r"\b\d+\s*days?\b"]);
        let m = TermMatcher::compile(&list, "duration").unwrap();
        assert!(m.is_match("for 3 days"));
        assert!(!m.is_match("for days"));
    }

    #[test]
    fn invalid_pattern_names_its_list() {
        let list = TermList::default().with_patterns(&["(unclosed"]);
        let err = TermMatcher::compile(&list, "age").unwrap_err();
        match err {
            VocabularyError::InvalidPattern { list, .. } => assert_eq!(list, "age"),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn builtin_lexicon_compiles() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.species.is_match("my dog"));
        assert!(lexicon.age.is_match("she is 7 years old"));
        assert!(lexicon.duration.is_match("for a few days"));
    }

    #[test]
    fn terse_replies_are_acknowledgements() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_acknowledgement("No."));
        assert!(lexicon.is_acknowledgement("nope!"));
        assert!(lexicon.is_acknowledgement("Not really"));
    }

    #[test]
    fn short_replies_with_ack_phrases_are_acknowledgements() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_acknowledgement("No changes, he's fine"));
        assert!(lexicon.is_acknowledgement("same as usual"));
    }

    #[test]
    fn long_replies_are_not_acknowledgements() {
        let lexicon = Lexicon::builtin();
        assert!(!lexicon.is_acknowledgement(
            "well nothing much has changed except she has been coughing at night"
        ));
    }

    #[test]
    fn unrelated_short_replies_are_not_acknowledgements() {
        let lexicon = Lexicon::builtin();
        assert!(!lexicon.is_acknowledgement("she is vomiting"));
    }

    #[test]
    fn normalize_text_folds_quotes_and_case() {
        assert_eq!(normalize_text("Can\u{2019}t \u{201C}Stop\u{201D}"), "can't \"stop\"");
    }
}
