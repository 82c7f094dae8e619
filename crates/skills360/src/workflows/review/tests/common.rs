use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::review::domain::{
    Answer, AnswerId, Collaborator, Evaluation, EvaluationId, EvaluationStatus,
    EvaluationTimestamps, FinalComments, Role, ScorePair, Seniority, SkillCategory,
};
use crate::workflows::review::narrative::{
    CompetencyAnalysis, NarrativeAnalyst, NarrativeError, NarrativeReply, NarrativeState,
};
use crate::workflows::review::repository::{EvaluationRepository, RepositoryError};
use crate::workflows::review::scoring;
use crate::workflows::review::service::EvaluationService;

pub(super) fn answer(id: &str, category: SkillCategory, is_ai: bool, self_rating: u8) -> Answer {
    Answer {
        id: AnswerId(id.to_string()),
        question_id: format!("q-{id}"),
        category,
        text: format!("Question {id}"),
        is_ai_skill: is_ai,
        self_rating,
        self_comment: None,
        manager_rating: None,
        manager_comment: None,
    }
}

pub(super) fn with_manager(mut answer: Answer, rating: u8) -> Answer {
    answer.manager_rating = Some(rating);
    answer
}

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

/// Hand-built draft evaluation around a fixed answer set, for state and
/// narrative tests that bypass the service layer.
pub(super) fn draft_evaluation(id: &str, answers: Vec<Answer>) -> Evaluation {
    let scores = ScorePair {
        self_assessment: scoring::self_scores(&answers),
        manager_assessment: scoring::manager_scores(&answers),
    };
    Evaluation {
        id: EvaluationId(id.to_string()),
        collaborator: collaborator("EMP001"),
        answers,
        scores,
        final_comments: FinalComments::default(),
        narrative: NarrativeState::Absent,
        status: EvaluationStatus::Draft,
        timestamps: EvaluationTimestamps {
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
            submitted_at: None,
            validated_at: None,
        },
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EvaluationId, Evaluation>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, evaluation: Evaluation) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .insert(evaluation.id.clone(), evaluation);
    }
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&evaluation.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(evaluation.id.clone(), evaluation.clone());
        Ok(evaluation)
    }

    fn update(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(evaluation.id.clone(), evaluation);
        Ok(())
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn latest_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|evaluation| evaluation.collaborator.employee_id == employee_id)
            .max_by_key(|evaluation| evaluation.timestamps.created_at)
            .cloned())
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _evaluation: Evaluation) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_for_employee(
        &self,
        _employee_id: &str,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Analyst returning a canned reply, for service tests.
pub(super) struct StubAnalyst;

#[async_trait::async_trait]
impl NarrativeAnalyst for StubAnalyst {
    async fn analyse(
        &self,
        _evaluation: &Evaluation,
        _scores: &crate::workflows::review::domain::ScoreDetail,
    ) -> Result<NarrativeReply, NarrativeError> {
        Ok(NarrativeReply {
            analysis: CompetencyAnalysis {
                strengths: vec!["stubbed strength".to_string()],
                improvement_areas: Vec::new(),
                priority_recommendations: Vec::new(),
                progression_plan: vec!["stubbed step".to_string()],
                detailed_narrative: "stubbed narrative".to_string(),
            },
            model: "stub-model".to_string(),
        })
    }
}

/// Analyst that always fails, to exercise the rule-based fallback.
pub(super) struct OfflineAnalyst;

#[async_trait::async_trait]
impl NarrativeAnalyst for OfflineAnalyst {
    async fn analyse(
        &self,
        _evaluation: &Evaluation,
        _scores: &crate::workflows::review::domain::ScoreDetail,
    ) -> Result<NarrativeReply, NarrativeError> {
        Err(NarrativeError::Exhausted)
    }
}

pub(super) fn build_service(
    analyst: Arc<dyn NarrativeAnalyst>,
) -> (EvaluationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EvaluationService::new(repository.clone(), analyst);
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
