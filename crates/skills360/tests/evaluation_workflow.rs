//! Integration scenarios for the 360-degree skills review workflow.
//!
//! Scenarios run end to end through the public service facade and the HTTP
//! router, covering the full draft-submit-validate lifecycle, both score
//! tracks, and the narrative fallback, without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use skills360::workflows::review::{
        evaluation_router, Collaborator, DisabledAnalyst, Evaluation, EvaluationEvent,
        EvaluationId, EvaluationRepository, EvaluationService, RepositoryError, Role, Seniority,
    };

    pub(super) fn collaborator(employee_id: &str) -> Collaborator {
        Collaborator {
            employee_id: employee_id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Martin".to_string(),
            role: Role::Developer,
            seniority: Seniority::Confirmed,
            joined_on: NaiveDate::from_ymd_opt(2021, 3, 1).expect("valid date"),
            last_evaluation_on: None,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<EvaluationId, Evaluation>>>,
    }

    impl EvaluationRepository for MemoryRepository {
        fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&evaluation.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(evaluation.id.clone(), evaluation.clone());
            Ok(evaluation)
        }

        fn update(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(evaluation.id.clone(), evaluation);
            Ok(())
        }

        fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn latest_for_employee(
            &self,
            employee_id: &str,
        ) -> Result<Option<Evaluation>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard
                .values()
                .filter(|evaluation| evaluation.collaborator.employee_id == employee_id)
                .max_by_key(|evaluation| evaluation.timestamps.created_at)
                .cloned())
        }
    }

    pub(super) fn build_service() -> Arc<EvaluationService<MemoryRepository>> {
        let repository = Arc::new(MemoryRepository::default());
        Arc::new(EvaluationService::new(
            repository,
            Arc::new(DisabledAnalyst),
        ))
    }

    pub(super) fn build_router() -> (axum::Router, Arc<EvaluationService<MemoryRepository>>) {
        let service = build_service();
        (evaluation_router(service.clone()), service)
    }

    /// Rate every answer on one track with the same rating.
    pub(super) fn rate_all(
        service: &EvaluationService<MemoryRepository>,
        evaluation: &Evaluation,
        rating: u8,
        manager: bool,
    ) -> Evaluation {
        let mut current = evaluation.clone();
        for answer in &evaluation.answers {
            let event = if manager {
                EvaluationEvent::ManagerRated {
                    answer_id: answer.id.clone(),
                    rating,
                    comment: None,
                }
            } else {
                EvaluationEvent::SelfRated {
                    answer_id: answer.id.clone(),
                    rating,
                    comment: None,
                }
            };
            current = service
                .record_event(&evaluation.id, event)
                .expect("rating applies");
        }
        current
    }
}

mod lifecycle {
    use super::common::*;
    use chrono::Utc;
    use skills360::workflows::review::{
        AiLevel, EvaluationEvent, EvaluationServiceError, EvaluationStatus, NarrativeSource,
        NarrativeState, ProfileViolation,
    };

    #[test]
    fn full_review_cycle_carries_both_score_tracks() {
        let service = build_service();
        let evaluation = service.start(collaborator("EMP100")).expect("starts");
        assert_eq!(evaluation.status, EvaluationStatus::Draft);
        assert!(!evaluation.answers.is_empty());

        let rated = rate_all(&service, &evaluation, 4, false);
        assert_eq!(rated.scores.self_assessment.total, 80.0);
        assert_eq!(rated.scores.self_assessment.ai_level, AiLevel::Expert);
        assert!(rated.scores.manager_assessment.is_none());

        let submitted = service
            .record_event(&evaluation.id, EvaluationEvent::Submitted { at: Utc::now() })
            .expect("submits");
        assert_eq!(submitted.status, EvaluationStatus::Submitted);

        let reviewed = rate_all(&service, &evaluation, 5, true);
        let manager = reviewed
            .scores
            .manager_assessment
            .expect("manager scores attached");
        assert_eq!(manager.total, 100.0);
        // The self track is untouched by the manager review.
        assert_eq!(reviewed.scores.self_assessment.total, 80.0);

        let validated = service
            .record_event(&evaluation.id, EvaluationEvent::Validated { at: Utc::now() })
            .expect("validates");
        assert_eq!(validated.status, EvaluationStatus::Validated);
    }

    #[test]
    fn a_second_evaluation_is_rejected_inside_the_spacing_window() {
        let service = build_service();
        service.start(collaborator("EMP100")).expect("starts");

        let error = service.start(collaborator("EMP100")).expect_err("too soon");
        assert!(matches!(
            error,
            EvaluationServiceError::Profile(ProfileViolation::RecentEvaluationExists)
        ));
    }

    #[tokio::test]
    async fn narrative_falls_back_to_the_rule_based_analysis() {
        let service = build_service();
        let evaluation = service.start(collaborator("EMP100")).expect("starts");
        rate_all(&service, &evaluation, 5, false);

        let updated = service
            .generate_narrative(&evaluation.id)
            .await
            .expect("narrative attaches");

        match updated.narrative {
            NarrativeState::Ready {
                analysis, source, ..
            } => {
                assert_eq!(source, NarrativeSource::RuleBased);
                assert!(!analysis.strengths.is_empty());
                assert!(!analysis.progression_plan.is_empty());
            }
            other => panic!("expected ready narrative, got {other:?}"),
        }
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    fn post_json(uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(payload).expect("serialize payload"),
            ))
            .expect("request")
    }

    async fn create_evaluation(router: &axum::Router) -> Value {
        let payload = serde_json::to_value(collaborator("EMP200")).expect("serialize");
        let response = router
            .clone()
            .oneshot(post_json("/api/v1/evaluations", &payload))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    #[tokio::test]
    async fn post_evaluations_returns_the_draft_view() {
        let (router, _) = build_router();
        let created = create_evaluation(&router).await;

        assert_eq!(created["status"], "draft");
        assert_eq!(created["employee_id"], "EMP200");
        assert_eq!(created["progress_percent"], 0);
        assert!(created["answers"].as_array().is_some_and(|a| !a.is_empty()));
        assert_eq!(created["narrative"]["state"], "absent");
    }

    #[tokio::test]
    async fn events_drive_the_evaluation_through_submission() {
        let (router, _) = build_router();
        let created = create_evaluation(&router).await;
        let evaluation_id = created["id"].as_str().expect("id").to_string();
        let answers = created["answers"].as_array().expect("answers");

        let events_uri = format!("/api/v1/evaluations/{evaluation_id}/events");
        let mut latest = created.clone();
        for answer in answers {
            let payload = json!({
                "type": "self_rating",
                "answer_id": answer["id"],
                "rating": 4,
            });
            let response = router
                .clone()
                .oneshot(post_json(&events_uri, &payload))
                .await
                .expect("router dispatch");
            assert_eq!(response.status(), StatusCode::OK);
            latest = read_json(response).await;
        }
        assert_eq!(latest["progress_percent"], 100);
        assert_eq!(latest["self_complete"], true);

        let response = router
            .clone()
            .oneshot(post_json(&events_uri, &json!({ "type": "submit" })))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let submitted = read_json(response).await;
        assert_eq!(submitted["status"], "submitted");
        assert_eq!(submitted["scores"]["self_assessment"]["total"], 80.0);
    }

    #[tokio::test]
    async fn premature_submission_is_rejected_with_a_message() {
        let (router, _) = build_router();
        let created = create_evaluation(&router).await;
        let evaluation_id = created["id"].as_str().expect("id");

        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/evaluations/{evaluation_id}/events"),
                &json!({ "type": "submit" }),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn unknown_evaluation_is_not_found() {
        let (router, _) = build_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/evaluations/eval-999999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn narrative_endpoint_attaches_the_fallback_analysis() {
        let (router, _) = build_router();
        let created = create_evaluation(&router).await;
        let evaluation_id = created["id"].as_str().expect("id");

        let response = router
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/evaluations/{evaluation_id}/narrative"),
                &json!({}),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["narrative"]["state"], "ready");
        assert_eq!(body["narrative"]["source"]["kind"], "rule_based");
    }
}
