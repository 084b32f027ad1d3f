//! Parsing of the language model's classification reply.
//!
//! The model is asked for a single JSON object but replies are not always
//! clean: they may be wrapped in markdown fences or surrounded by prose.
//! The parser strips fences, isolates the first balanced JSON object and
//! then requires every field to be present with the right type.

use serde::Deserialize;
use thiserror::Error;

use super::criteria::CriteriaSet;
use super::severity::Severity;

/// Why a model reply could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResponseParseError {
    #[error("Response contains no JSON object")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    InvalidJson(String),

    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),
}

/// Criteria, emergency flag and severity produced by one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionResult {
    pub criteria: CriteriaSet,
    pub emergency_detected: bool,
    pub severity: Severity,
}

/// Wire shape of the model reply. Every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    pet_species: bool,
    pet_age: bool,
    pet_concerns: bool,
    duration_symptoms: bool,
    eating_drinking: bool,
    behavioral_changes: bool,
    medical_history: bool,
    emergency_detected: bool,
    severity: String,
}

/// Parses a raw model reply into an [`ExtractionResult`].
pub fn parse_model_reply(raw: &str) -> Result<ExtractionResult, ResponseParseError> {
    let json = extract_json_object(raw).ok_or(ResponseParseError::NoJsonObject)?;

    let reply: ModelReply =
        serde_json::from_str(json).map_err(|e| ResponseParseError::InvalidJson(e.to_string()))?;

    let severity = reply
        .severity
        .parse::<Severity>()
        .map_err(|_| ResponseParseError::InvalidSeverity(reply.severity.clone()))?;

    Ok(ExtractionResult {
        criteria: CriteriaSet {
            pet_species: reply.pet_species,
            pet_age: reply.pet_age,
            pet_concerns: reply.pet_concerns,
            duration_symptoms: reply.duration_symptoms,
            eating_drinking: reply.eating_drinking,
            behavioral_changes: reply.behavioral_changes,
            medical_history: reply.medical_history,
        },
        emergency_detected: reply.emergency_detected,
        severity,
    })
}

/// Finds the JSON object in a reply, looking inside code fences first.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let body = strip_code_fence(trimmed).unwrap_or(trimmed);

    let start = body.find('{')?;
    extract_balanced_object(body, start)
}

/// Returns the contents of the first ``` fence, if any.
fn strip_code_fence(s: &str) -> Option<&str> {
    let open = s.find("```")?;
    let after_ticks = &s[open + 3..];
    // Skip an optional language tag on the opening line.
    let content_start = after_ticks.find('\n').map(|i| i + 1)?;
    let content = &after_ticks[content_start..];
    let end = content.find("```")?;
    Some(content[..end].trim())
}

fn extract_balanced_object(s: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&s[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
