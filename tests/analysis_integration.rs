//! Integration tests for transcript analysis.
//!
//! These tests drive the public API end to end:
//! 1. Raw chat messages are validated into a `Transcript`
//! 2. The orchestrator tries the primary extractor (a mock provider here)
//! 3. Failures, slow replies and missing configuration degrade to the fallback
//!
//! No network access is required.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use pet_intake::adapters::ai::{MockAIProvider, MockError};
use pet_intake::adapters::extraction::LlmCriteriaExtractor;
use pet_intake::config::AppConfig;
use pet_intake::domain::foundation::ErrorCode;
use pet_intake::domain::intake::{Criterion, Severity, Stage};
use pet_intake::{Analysis, AnalysisOrchestrator, AnalysisSource, IntakeDecision, RawMessage, Transcript};

// =============================================================================
// Test Infrastructure
// =============================================================================

const PARTIAL_REPLY: &str = r#"{"petSpecies": true, "petAge": true, "petConcerns": true, "durationSymptoms": false, "eatingDrinking": false, "behavioralChanges": false, "medicalHistory": false, "emergencyDetected": false, "severity": "moderate"}"#;

fn raw(pairs: &[(&str, &str)]) -> Vec<RawMessage> {
    pairs
        .iter()
        .map(|(role, content)| RawMessage::new(*role, *content))
        .collect()
}

fn transcript(pairs: &[(&str, &str)]) -> Transcript {
    Transcript::from_raw(raw(pairs)).unwrap()
}

fn full_conversation() -> Vec<(&'static str, &'static str)> {
    vec![
        ("assistant", "Hi! I'm here to help. What kind of pet do you have?"),
        ("user", "I have a cat named Luna."),
        ("assistant", "How old is Luna?"),
        ("user", "She's 7 years old."),
        ("assistant", "What's worrying you about her?"),
        ("user", "She has been vomiting since Tuesday."),
        ("assistant", "Is she eating and drinking normally?"),
        ("user", "She hasn't touched her food and drinks less water."),
        ("assistant", "Has her behavior or activity level changed?"),
        ("user", "No changes."),
        ("assistant", "Any medical history or medications?"),
        ("user", "She had surgery last year and takes thyroid medication."),
    ]
}

fn orchestrator_with(mock: &MockAIProvider) -> AnalysisOrchestrator {
    let extractor = LlmCriteriaExtractor::new(Arc::new(mock.clone()));
    AnalysisOrchestrator::default().with_primary(Arc::new(extractor))
}

// =============================================================================
// Fallback path
// =============================================================================

#[tokio::test]
async fn full_conversation_completes_intake() {
    let orchestrator = AnalysisOrchestrator::default();
    let analysis = orchestrator
        .analyze(&transcript(&full_conversation()), None)
        .await;

    assert_eq!(analysis.source(), AnalysisSource::Fallback);
    assert_eq!(analysis.completed_criteria(), 7);
    assert_eq!(analysis.progress_percentage().value(), 100);
    assert_eq!(analysis.stage(), Stage::Complete);
    assert!(analysis.is_complete());
    assert!(!analysis.emergency_detected());
    assert_eq!(analysis.severity(), Severity::Moderate);
    assert_eq!(analysis.next_step(), IntakeDecision::Conclude);
}

#[tokio::test]
async fn progress_grows_as_conversation_proceeds() {
    let orchestrator = AnalysisOrchestrator::default();
    let conversation = full_conversation();

    let early = orchestrator
        .analyze(&transcript(&conversation[..2]), None)
        .await;
    assert_eq!(early.completed_criteria(), 1);
    assert_eq!(early.stage(), Stage::InitialAssessment);
    assert_eq!(early.progress_percentage().value(), 14);

    let middle = orchestrator
        .analyze(&transcript(&conversation[..6]), Some(&early))
        .await;
    assert_eq!(middle.completed_criteria(), 4);
    assert_eq!(middle.stage(), Stage::InProgress);
    assert_eq!(middle.progress_percentage().value(), 57);
    assert_eq!(
        middle.missing_criteria(),
        vec![
            Criterion::EatingDrinking,
            Criterion::BehavioralChanges,
            Criterion::MedicalHistory
        ]
    );
    assert_eq!(
        middle.next_step(),
        IntakeDecision::AskAbout(Criterion::EatingDrinking)
    );
}

#[tokio::test]
async fn empty_transcript_is_getting_started() {
    let analysis = AnalysisOrchestrator::default()
        .analyze(&Transcript::new(), None)
        .await;

    assert_eq!(analysis.completed_criteria(), 0);
    assert_eq!(analysis.progress_percentage().value(), 0);
    assert_eq!(analysis.stage(), Stage::GettingStarted);
    assert_eq!(analysis.severity(), Severity::Moderate);
    assert!(!analysis.is_complete());
}

#[tokio::test]
async fn short_reply_counts_for_behavior_only_after_behavior_question() {
    let orchestrator = AnalysisOrchestrator::default();

    let asked = transcript(&[
        ("assistant", "Has his energy or behavior changed lately?"),
        ("user", "Nope."),
    ]);
    let analysis = orchestrator.analyze(&asked, None).await;
    assert!(analysis.criteria().behavioral_changes);

    let not_asked = transcript(&[
        ("assistant", "Is he eating his food?"),
        ("user", "Nope."),
    ]);
    let analysis = orchestrator.analyze(&not_asked, None).await;
    assert!(!analysis.criteria().behavioral_changes);
}

#[test]
fn confirmation_of_assistant_question_covers_asked_criteria() {
    let analysis = AnalysisOrchestrator::default().analyze_offline(&transcript(&[
        ("assistant", "How old is your dog, and is he eating and drinking?"),
        ("user", "yes"),
    ]));

    assert!(analysis.criteria().pet_species);
    assert!(analysis.criteria().pet_age);
    assert!(analysis.criteria().eating_drinking);
    assert!(!analysis.criteria().behavioral_changes);
    assert_eq!(analysis.completed_criteria(), 3);
    assert_eq!(analysis.stage(), Stage::InProgress);
}

#[tokio::test]
async fn behavior_vocabulary_counts_without_a_question() {
    let analysis = AnalysisOrchestrator::default()
        .analyze(&transcript(&[("user", "My dog is very lethargic")]), None)
        .await;

    assert!(analysis.criteria().behavioral_changes);
}

#[tokio::test]
async fn red_flag_forces_critical_severity() {
    let analysis = AnalysisOrchestrator::default()
        .analyze(
            &transcript(&[("user", "My dog had a seizure, it's only mild now")]),
            None,
        )
        .await;

    assert!(analysis.emergency_detected());
    assert_eq!(analysis.severity(), Severity::Critical);
    assert_eq!(analysis.next_step(), IntakeDecision::EscalateEmergency);
}

#[tokio::test]
async fn severity_vocabulary_is_ranked() {
    let orchestrator = AnalysisOrchestrator::default();

    let urgent = orchestrator
        .analyze(&transcript(&[("user", "The limp looks serious")]), None)
        .await;
    assert_eq!(urgent.severity(), Severity::Urgent);

    let routine = orchestrator
        .analyze(&transcript(&[("user", "Just a mild cough")]), None)
        .await;
    assert_eq!(routine.severity(), Severity::Routine);
}

// =============================================================================
// Primary path and fault injection
// =============================================================================

#[tokio::test]
async fn primary_reply_is_used_when_valid() {
    let mock = MockAIProvider::new().with_response(PARTIAL_REPLY);
    let analysis = orchestrator_with(&mock)
        .analyze(&transcript(&[("user", "hello")]), None)
        .await;

    assert_eq!(analysis.source(), AnalysisSource::Primary);
    assert_eq!(analysis.completed_criteria(), 3);
    assert_eq!(analysis.stage(), Stage::InProgress);
    assert_eq!(analysis.severity(), Severity::Moderate);
}

#[tokio::test]
async fn timeout_degrades_to_fallback() {
    let mock = MockAIProvider::new()
        .with_response(PARTIAL_REPLY)
        .with_delay(Duration::from_secs(2));
    let orchestrator = orchestrator_with(&mock).with_timeout(Duration::from_millis(50));

    let analysis = orchestrator
        .analyze(&transcript(&[("user", "My puppy is coughing")]), None)
        .await;

    assert_eq!(analysis.source(), AnalysisSource::Fallback);
    assert!(analysis.criteria().pet_species);
    assert!(analysis.criteria().pet_concerns);
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.completed_count(), 0);
}

#[tokio::test]
async fn malformed_json_degrades_to_fallback() {
    let mock = MockAIProvider::new()
        .with_response(r#"{"petSpecies": true, "severity": "Moderate""#)
        .with_response(r#"{"petSpecies": "yes"}"#);
    let orchestrator = orchestrator_with(&mock);
    let t = transcript(&[("user", "My hamster stopped eating yesterday")]);

    for _ in 0..2 {
        let analysis = orchestrator.analyze(&t, None).await;
        assert_eq!(analysis.source(), AnalysisSource::Fallback);
        assert_eq!(analysis.completed_criteria(), 3);
    }
}

#[tokio::test]
async fn unknown_severity_degrades_to_fallback() {
    let mock = MockAIProvider::new().with_response(PARTIAL_REPLY.replace("moderate", "Grave"));
    let analysis = orchestrator_with(&mock)
        .analyze(&transcript(&[("user", "my cat")]), None)
        .await;

    assert_eq!(analysis.source(), AnalysisSource::Fallback);
}

#[tokio::test]
async fn provider_failures_degrade_to_fallback() {
    let mock = MockAIProvider::new()
        .with_error(MockError::RateLimited { retry_after_secs: 30 })
        .with_error(MockError::AuthenticationFailed)
        .with_error(MockError::Network {
            message: "connection refused".to_string(),
        });
    let orchestrator = orchestrator_with(&mock);
    let t = transcript(&[("user", "my bird")]);

    for _ in 0..3 {
        let analysis = orchestrator.analyze(&t, None).await;
        assert_eq!(analysis.source(), AnalysisSource::Fallback);
        assert!(analysis.criteria().pet_species);
    }
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn missing_configuration_runs_fallback_only() {
    let orchestrator = AnalysisOrchestrator::from_config(&AppConfig::default()).unwrap();
    assert!(!orchestrator.has_primary());

    let analysis = orchestrator
        .analyze(&transcript(&[("user", "My ferret is 2 years old")]), None)
        .await;

    assert_eq!(analysis.source(), AnalysisSource::Fallback);
    assert!(analysis.criteria().pet_species);
    assert!(analysis.criteria().pet_age);
}

// =============================================================================
// Cancellation and concurrency
// =============================================================================

#[tokio::test]
async fn dropping_analysis_cancels_primary_call() {
    let mock = MockAIProvider::new()
        .with_response(PARTIAL_REPLY)
        .with_delay(Duration::from_secs(5));
    let orchestrator = orchestrator_with(&mock);
    let t = transcript(&[("user", "my dog")]);

    let superseded = tokio::time::timeout(Duration::from_millis(50), orchestrator.analyze(&t, None)).await;
    assert!(superseded.is_err());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.completed_count(), 0);
}

#[tokio::test]
async fn concurrent_analyses_are_independent() {
    let orchestrator = Arc::new(AnalysisOrchestrator::default());
    let inputs = vec![
        transcript(&[("user", "my dog")]),
        transcript(&[("user", "my cat is 3 years old")]),
        transcript(&[("user", "my rabbit was poisoned")]),
        Transcript::new(),
    ];

    let futures = inputs.iter().map(|t| {
        let orchestrator = Arc::clone(&orchestrator);
        async move { orchestrator.analyze(t, None).await }
    });
    let results: Vec<Analysis> = join_all(futures).await;

    let expected: Vec<Analysis> = inputs
        .iter()
        .map(|t| orchestrator.analyze_offline(t))
        .collect();
    assert_eq!(results, expected);
    assert_eq!(results[1].completed_criteria(), 2);
    assert!(results[2].emergency_detected());
}

#[tokio::test]
async fn concurrent_primary_calls_overlap() {
    let mock = MockAIProvider::new().with_delay(Duration::from_millis(200));
    let orchestrator = Arc::new(orchestrator_with(&mock).with_timeout(Duration::from_secs(5)));
    let t = transcript(&[("user", "my dog")]);

    let started = std::time::Instant::now();
    let results = join_all((0..8).map(|_| orchestrator.analyze(&t, None))).await;

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(mock.completed_count(), 8);
    assert!(results
        .iter()
        .all(|a| a.source() == AnalysisSource::Primary));
}

// =============================================================================
// Input boundary
// =============================================================================

#[test]
fn unknown_role_is_rejected_with_index() {
    let err = Transcript::from_raw(raw(&[("user", "hi"), ("system", "be nice")])).unwrap_err();

    assert_eq!(err.code, ErrorCode::UnknownRole);
    assert_eq!(err.details.get("index").map(String::as_str), Some("1"));
}

#[test]
fn blank_message_is_rejected() {
    let err = Transcript::from_raw(raw(&[("user", "   ")])).unwrap_err();
    assert_eq!(err.details.get("index").map(String::as_str), Some("0"));
}

#[test]
fn analysis_serializes_with_camel_case_fields() {
    let analysis = AnalysisOrchestrator::default()
        .analyze_offline(&transcript(&[("user", "my dog is 3 years old")]));
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["criteria"]["petSpecies"], true);
    assert_eq!(json["completedCriteria"], 2);
    assert_eq!(json["stage"], "Initial Assessment");
    assert_eq!(json["isComplete"], false);
    assert_eq!(json["source"], "fallback");
}
