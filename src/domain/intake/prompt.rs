//! Prompt construction for model-backed criteria extraction.

use super::message::{Role, Transcript};

/// System instruction for the extraction call.
///
/// Mirrors the deterministic rules, including the behavior context rule,
/// so both extraction paths agree on what counts as an answer.
pub const SYSTEM_PROMPT: &str = r#"You analyze a conversation between a pet owner (User) and a veterinary triage assistant (Assistant).
Decide which of seven intake facts the conversation already establishes.

Criteria (true if the information appears anywhere in the conversation, from either speaker; a short confirmation such as "yes" to an Assistant question counts):
- petSpecies: the kind of animal (dog, cat, rabbit, bird, reptile, ...).
- petAge: the pet's age, as a number or a life stage (puppy, kitten, senior, ...).
- petConcerns: the main symptom or problem prompting the visit.
- durationSymptoms: how long the problem has been going on, or when it started.
- eatingDrinking: any statement about appetite, eating or drinking, including "normal".
- behavioralChanges: a statement by the USER about behavior, activity or energy. If the Assistant asked about behavior or activity earlier in the conversation, a short reply such as "no", "same", "normal", "fine", "nothing" or "not really" DOES count as answering it. A bare "no" to an unrelated question does NOT count.
- medicalHistory: medications, past conditions, surgeries, vaccinations or previous vet visits, including "none".

Also decide:
- emergencyDetected: true if the conversation mentions a red flag such as difficulty breathing, choking, seizure, collapse, unconsciousness, severe bleeding, being hit by a car, poisoning or toxin ingestion, bloat, inability to urinate, extreme pain, pale gums, blue tongue or a distended abdomen.
- severity: one of "Critical", "Urgent", "Moderate", "Routine". Use "Critical" whenever emergencyDetected is true.

Respond with a single JSON object and nothing else:
{"petSpecies": bool, "petAge": bool, "petConcerns": bool, "durationSymptoms": bool, "eatingDrinking": bool, "behavioralChanges": bool, "medicalHistory": bool, "emergencyDetected": bool, "severity": "Critical|Urgent|Moderate|Routine"}"#;

/// Renders the transcript as the user content of the extraction call.
pub fn render_transcript(transcript: &Transcript) -> String {
    let mut rendered = String::from("Conversation:\n");

    if transcript.is_empty() {
        rendered.push_str("(no messages yet)\n");
        return rendered;
    }

    for message in transcript.messages() {
        let speaker = match message.role() {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        rendered.push_str(speaker);
        rendered.push_str(": ");
        rendered.push_str(message.content().trim());
        rendered.push('\n');
    }

    rendered
}
