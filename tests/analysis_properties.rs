//! Property tests for analysis invariants.

use proptest::prelude::*;

use pet_intake::domain::intake::{
    Analysis, AnalysisSource, CriteriaSet, Criterion, Message, Severity, Stage,
};
use pet_intake::{AnalysisOrchestrator, Transcript};

fn criteria_strategy() -> impl Strategy<Value = CriteriaSet> {
    proptest::collection::vec(any::<bool>(), 7).prop_map(|flags| {
        let mut set = CriteriaSet::default();
        for (criterion, flag) in Criterion::all().iter().zip(flags) {
            set.set(*criterion, flag);
        }
        set
    })
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::Urgent),
        Just(Severity::Moderate),
        Just(Severity::Routine),
    ]
}

fn source_strategy() -> impl Strategy<Value = AnalysisSource> {
    prop_oneof![Just(AnalysisSource::Primary), Just(AnalysisSource::Fallback)]
}

fn transcript_strategy() -> impl Strategy<Value = Transcript> {
    proptest::collection::vec((any::<bool>(), "\\PC{1,80}"), 0..8).prop_map(|turns| {
        let messages = turns
            .into_iter()
            .filter_map(|(is_user, text)| {
                if is_user {
                    Message::user(text).ok()
                } else {
                    Message::assistant(text).ok()
                }
            })
            .collect();
        Transcript::from_messages(messages)
    })
}

fn expected_stage(count: u8) -> Stage {
    match count {
        7 => Stage::Complete,
        5 | 6 => Stage::Finalizing,
        3 | 4 => Stage::InProgress,
        1 | 2 => Stage::InitialAssessment,
        _ => Stage::GettingStarted,
    }
}

fn check_invariants(analysis: &Analysis) -> Result<(), TestCaseError> {
    let count = Criterion::all()
        .iter()
        .filter(|c| analysis.criteria().get(**c))
        .count() as u8;

    prop_assert_eq!(analysis.completed_criteria(), count);
    prop_assert_eq!(
        u32::from(analysis.progress_percentage().value()),
        (u32::from(count) * 100 * 2 + 7) / 14
    );
    prop_assert_eq!(analysis.stage(), expected_stage(count));
    prop_assert_eq!(analysis.is_complete(), count == 7);
    if analysis.emergency_detected() {
        prop_assert_eq!(analysis.severity(), Severity::Critical);
    }
    Ok(())
}

proptest! {
    #[test]
    fn constructed_analysis_upholds_invariants(
        criteria in criteria_strategy(),
        emergency in any::<bool>(),
        severity in severity_strategy(),
        source in source_strategy(),
    ) {
        let analysis = Analysis::new(criteria, emergency, severity, source);
        check_invariants(&analysis)?;
        prop_assert_eq!(analysis.source(), source);
        if !emergency {
            prop_assert_eq!(analysis.severity(), severity);
        }
    }

    #[test]
    fn deserialized_analysis_recomputes_derived_fields(
        criteria in criteria_strategy(),
        severity in severity_strategy(),
    ) {
        let original = Analysis::new(criteria, true, severity, AnalysisSource::Primary);
        let mut json = serde_json::to_value(&original).unwrap();
        json["completedCriteria"] = serde_json::json!(0);
        json["isComplete"] = serde_json::json!(true);
        json["severity"] = serde_json::json!("Routine");

        let restored: Analysis = serde_json::from_value(json).unwrap();
        check_invariants(&restored)?;
        prop_assert_eq!(restored, original);
    }

    #[test]
    fn offline_analysis_never_panics_and_upholds_invariants(
        transcript in transcript_strategy(),
    ) {
        let orchestrator = AnalysisOrchestrator::default();
        let analysis = orchestrator.analyze_offline(&transcript);

        check_invariants(&analysis)?;
        prop_assert_eq!(analysis.source(), AnalysisSource::Fallback);
    }

    #[test]
    fn offline_analysis_is_deterministic(transcript in transcript_strategy()) {
        let orchestrator = AnalysisOrchestrator::default();
        prop_assert_eq!(
            orchestrator.analyze_offline(&transcript),
            orchestrator.analyze_offline(&transcript)
        );
    }

    #[test]
    fn red_flag_anywhere_forces_critical(
        transcript in transcript_strategy(),
        flag in prop_oneof![
            Just("he is not breathing"),
            Just("she collapsed"),
            Just("ate something toxic"),
            Just("hit by a car"),
        ],
    ) {
        let mut transcript = transcript;
        transcript.push(Message::user(flag).unwrap());

        let analysis = AnalysisOrchestrator::default().analyze_offline(&transcript);
        prop_assert!(analysis.emergency_detected());
        prop_assert_eq!(analysis.severity(), Severity::Critical);
    }
}
