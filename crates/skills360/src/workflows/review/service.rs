use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Answer, AnswerId, Collaborator, Evaluation, EvaluationId, EvaluationStatus,
    EvaluationTimestamps, FinalComments, ScorePair,
};
use super::narrative::{fallback, NarrativeAnalyst, NarrativeSource, NarrativeState};
use super::profile::{self, ProfileViolation};
use super::questions::questions_for_role;
use super::repository::{EvaluationRepository, RepositoryError};
use super::state::{self, EvaluationEvent, TransitionError};

/// Service composing the profile checks, repository, transition function,
/// and the narrative analyst.
pub struct EvaluationService<R> {
    repository: Arc<R>,
    analyst: Arc<dyn NarrativeAnalyst>,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ANSWER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

fn next_answer_id() -> AnswerId {
    let id = ANSWER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnswerId(format!("ans-{id:06}"))
}

impl<R> EvaluationService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(repository: Arc<R>, analyst: Arc<dyn NarrativeAnalyst>) -> Self {
        Self {
            repository,
            analyst,
        }
    }

    /// Start a draft evaluation: validate the profile, enforce the spacing
    /// rule, snapshot the role's questionnaire with every answer unrated.
    pub fn start(
        &self,
        collaborator: Collaborator,
    ) -> Result<Evaluation, EvaluationServiceError> {
        let now = Utc::now();
        profile::validate_profile(&collaborator, now.date_naive())?;

        // The spacing rule considers both the store and the date the client
        // declares for evaluations held elsewhere.
        let stored_on = self
            .repository
            .latest_for_employee(&collaborator.employee_id)?
            .map(|previous| previous.timestamps.created_at.date_naive());
        let previous_on = collaborator
            .last_evaluation_on
            .into_iter()
            .chain(stored_on)
            .max();
        if let Some(previous_on) = previous_on {
            if profile::within_spacing_window(previous_on, now.date_naive()) {
                return Err(ProfileViolation::RecentEvaluationExists.into());
            }
        }

        let answers: Vec<Answer> = questions_for_role(collaborator.role)
            .into_iter()
            .map(|template| Answer {
                id: next_answer_id(),
                question_id: template.id.to_string(),
                category: template.category,
                text: template.text.to_string(),
                is_ai_skill: template.is_ai_skill,
                self_rating: 0,
                self_comment: None,
                manager_rating: None,
                manager_comment: None,
            })
            .collect();

        let evaluation = Evaluation {
            id: next_evaluation_id(),
            collaborator,
            answers,
            scores: ScorePair {
                self_assessment: super::scoring::self_scores(&[]),
                manager_assessment: None,
            },
            final_comments: FinalComments::default(),
            narrative: NarrativeState::Absent,
            status: EvaluationStatus::Draft,
            timestamps: EvaluationTimestamps {
                created_at: now,
                submitted_at: None,
                validated_at: None,
            },
        };

        let stored = self.repository.insert(evaluation)?;
        info!(
            evaluation = %stored.id.0,
            employee = %stored.collaborator.employee_id,
            questions = stored.answers.len(),
            "evaluation started"
        );
        Ok(stored)
    }

    /// Apply one event to a stored evaluation and persist the result.
    pub fn record_event(
        &self,
        evaluation_id: &EvaluationId,
        event: EvaluationEvent,
    ) -> Result<Evaluation, EvaluationServiceError> {
        let current = self
            .repository
            .fetch(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?;

        let next = state::apply(&current, event)?;
        self.repository.update(next.clone())?;

        if next.status != current.status {
            info!(
                evaluation = %next.id.0,
                status = next.status.label(),
                "evaluation status changed"
            );
        }
        Ok(next)
    }

    /// Fetch an evaluation for API responses.
    pub fn get(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Evaluation, EvaluationServiceError> {
        let evaluation = self
            .repository
            .fetch(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(evaluation)
    }

    /// Run the narrative analyst over the self-assessment scores and attach
    /// the result. Analyst failure never propagates: the deterministic
    /// rule-based analysis takes its place.
    pub async fn generate_narrative(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Evaluation, EvaluationServiceError> {
        let pending = self.record_event(evaluation_id, EvaluationEvent::NarrativeRequested)?;
        let scores = pending.scores.self_assessment.clone();

        let (analysis, source) = match self.analyst.analyse(&pending, &scores).await {
            Ok(reply) => (reply.analysis, NarrativeSource::Model(reply.model)),
            Err(error) => {
                warn!(
                    evaluation = %pending.id.0,
                    %error,
                    "narrative backend unavailable, using rule-based analysis"
                );
                (fallback::default_analysis(&scores), NarrativeSource::RuleBased)
            }
        };

        self.record_event(
            evaluation_id,
            EvaluationEvent::NarrativeAttached {
                analysis,
                generated_at: Utc::now(),
                source,
            },
        )
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileViolation),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
