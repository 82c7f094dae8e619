use serde::Serialize;

use super::domain::{Answer, Evaluation, EvaluationId, ScorePair};
use super::narrative::NarrativeState;
use super::scoring::{is_manager_complete, is_self_complete, progress_percent};

/// Storage abstraction so the service module can be exercised in isolation.
/// The hosted backend sits behind this trait; tests and the bundled binary
/// use in-memory implementations.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError>;
    fn update(&self, evaluation: Evaluation) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError>;
    /// Most recently created evaluation for an employee, regardless of status.
    fn latest_for_employee(&self, employee_id: &str)
        -> Result<Option<Evaluation>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Serialized representation of an evaluation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub id: EvaluationId,
    pub employee_id: String,
    pub status: &'static str,
    pub progress_percent: u8,
    pub self_complete: bool,
    pub manager_complete: bool,
    pub answers: Vec<Answer>,
    pub scores: ScorePair,
    pub narrative: NarrativeState,
}

impl EvaluationView {
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            id: evaluation.id.clone(),
            employee_id: evaluation.collaborator.employee_id.clone(),
            status: evaluation.status.label(),
            progress_percent: progress_percent(&evaluation.answers),
            self_complete: is_self_complete(&evaluation.answers),
            manager_complete: is_manager_complete(&evaluation.answers),
            answers: evaluation.answers.clone(),
            scores: evaluation.scores.clone(),
            narrative: evaluation.narrative.clone(),
        }
    }
}
