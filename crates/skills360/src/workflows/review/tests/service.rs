use std::sync::Arc;

use chrono::{Duration, Utc};

use super::common::*;
use crate::workflows::review::domain::{EvaluationId, EvaluationStatus, SkillCategory};
use crate::workflows::review::narrative::{NarrativeSource, NarrativeState};
use crate::workflows::review::profile::ProfileViolation;
use crate::workflows::review::repository::{EvaluationRepository, RepositoryError};
use crate::workflows::review::service::{EvaluationService, EvaluationServiceError};
use crate::workflows::review::state::EvaluationEvent;

#[test]
fn starting_snapshots_the_role_questionnaire_unrated() {
    let (service, _) = build_service(Arc::new(StubAnalyst));

    let evaluation = service.start(collaborator("EMP001")).expect("starts");

    assert_eq!(evaluation.status, EvaluationStatus::Draft);
    assert_eq!(evaluation.answers.len(), 16);
    assert!(evaluation.answers.iter().all(|a| !a.is_self_rated()));
    assert!(evaluation.answers.iter().all(|a| a.manager_rating.is_none()));
    assert!(evaluation
        .answers
        .iter()
        .any(|a| a.category == SkillCategory::SoftSkills));
    assert!(evaluation.answers.iter().any(|a| a.is_ai_skill));
    assert_eq!(evaluation.scores.self_assessment.total, 0.0);
    assert!(evaluation.scores.manager_assessment.is_none());
    assert_eq!(evaluation.narrative, NarrativeState::Absent);
    assert!(evaluation.id.0.starts_with("eval-"));
}

#[test]
fn starting_rejects_a_malformed_profile() {
    let (service, _) = build_service(Arc::new(StubAnalyst));

    let mut profile = collaborator("EMP 01");
    let error = service.start(profile.clone()).expect_err("bad id");
    assert!(matches!(
        error,
        EvaluationServiceError::Profile(ProfileViolation::InvalidEmployeeId)
    ));

    profile = collaborator("EMP001");
    profile.first_name = "A".to_string();
    let error = service.start(profile).expect_err("short name");
    assert!(matches!(
        error,
        EvaluationServiceError::Profile(ProfileViolation::InvalidName { field: "first name" })
    ));

    let mut profile = collaborator("EMP001");
    profile.joined_on = (Utc::now() + Duration::days(10)).date_naive();
    let error = service.start(profile).expect_err("future join date");
    assert!(matches!(
        error,
        EvaluationServiceError::Profile(ProfileViolation::JoinDateNotInPast)
    ));
}

#[test]
fn starting_enforces_the_spacing_rule_against_the_latest_evaluation() {
    let (service, repository) = build_service(Arc::new(StubAnalyst));

    let mut recent = draft_evaluation("eval-recent", vec![]);
    recent.timestamps.created_at = Utc::now() - Duration::days(30);
    repository.seed(recent);

    let error = service.start(collaborator("EMP001")).expect_err("too soon");
    assert!(matches!(
        error,
        EvaluationServiceError::Profile(ProfileViolation::RecentEvaluationExists)
    ));

    // A different employee is unaffected.
    let mut other = collaborator("EMP002");
    other.last_name = "Okafor".to_string();
    service.start(other).expect("starts");
}

#[test]
fn starting_honors_a_declared_external_evaluation_date() {
    let (service, _) = build_service(Arc::new(StubAnalyst));

    // The previous evaluation lives outside this service's store; the
    // declared date alone must trip the spacing rule.
    let mut profile = collaborator("EMP001");
    profile.last_evaluation_on = Some((Utc::now() - Duration::days(60)).date_naive());
    let error = service.start(profile).expect_err("declared too recent");
    assert!(matches!(
        error,
        EvaluationServiceError::Profile(ProfileViolation::RecentEvaluationExists)
    ));

    let mut profile = collaborator("EMP001");
    profile.last_evaluation_on = Some((Utc::now() - Duration::days(400)).date_naive());
    service.start(profile).expect("declared date outside the window");
}

#[test]
fn starting_is_allowed_once_the_spacing_window_has_elapsed() {
    let (service, repository) = build_service(Arc::new(StubAnalyst));

    let mut old = draft_evaluation("eval-old", vec![]);
    old.timestamps.created_at = Utc::now() - Duration::days(400);
    repository.seed(old);

    service.start(collaborator("EMP001")).expect("window elapsed");
}

#[test]
fn recording_an_event_persists_the_next_state() {
    let (service, repository) = build_service(Arc::new(StubAnalyst));
    let evaluation = service.start(collaborator("EMP001")).expect("starts");
    let answer_id = evaluation.answers[0].id.clone();

    let next = service
        .record_event(
            &evaluation.id,
            EvaluationEvent::SelfRated {
                answer_id: answer_id.clone(),
                rating: 4,
                comment: Some("solid quarter".to_string()),
            },
        )
        .expect("event applies");
    assert_eq!(next.answers[0].self_rating, 4);

    let stored = repository
        .fetch(&evaluation.id)
        .expect("repository reachable")
        .expect("evaluation stored");
    assert_eq!(stored.answers[0].self_rating, 4);
    assert_eq!(stored.answers[0].self_comment.as_deref(), Some("solid quarter"));
}

#[test]
fn recording_against_an_unknown_evaluation_is_not_found() {
    let (service, _) = build_service(Arc::new(StubAnalyst));

    let error = service
        .record_event(
            &EvaluationId("eval-999999".to_string()),
            EvaluationEvent::NarrativeRequested,
        )
        .expect_err("missing");
    assert!(matches!(
        error,
        EvaluationServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn repository_outage_surfaces_as_a_repository_error() {
    let service = EvaluationService::new(Arc::new(UnavailableRepository), Arc::new(StubAnalyst));

    let error = service.start(collaborator("EMP001")).expect_err("offline");
    assert!(matches!(
        error,
        EvaluationServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[tokio::test]
async fn narrative_generation_attaches_the_model_analysis() {
    let (service, _) = build_service(Arc::new(StubAnalyst));
    let evaluation = service.start(collaborator("EMP001")).expect("starts");

    let updated = service
        .generate_narrative(&evaluation.id)
        .await
        .expect("narrative attaches");

    match updated.narrative {
        NarrativeState::Ready {
            analysis, source, ..
        } => {
            assert_eq!(source, NarrativeSource::Model("stub-model".to_string()));
            assert_eq!(analysis.strengths, vec!["stubbed strength".to_string()]);
        }
        other => panic!("expected ready narrative, got {other:?}"),
    }
}

#[tokio::test]
async fn narrative_generation_falls_back_when_the_analyst_fails() {
    let (service, _) = build_service(Arc::new(OfflineAnalyst));
    let evaluation = service.start(collaborator("EMP001")).expect("starts");

    let updated = service
        .generate_narrative(&evaluation.id)
        .await
        .expect("fallback attaches");

    match updated.narrative {
        NarrativeState::Ready {
            analysis, source, ..
        } => {
            assert_eq!(source, NarrativeSource::RuleBased);
            assert!(!analysis.detailed_narrative.is_empty());
        }
        other => panic!("expected ready narrative, got {other:?}"),
    }
}
