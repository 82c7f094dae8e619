//! Explicit evaluation state transitions.
//!
//! `apply` is the only way an evaluation changes: it takes the current value
//! and an event and returns a new evaluation with the derived scores
//! recomputed, leaving the input untouched. The score engine is called as a
//! pure derivation step after each transition, never interleaved with I/O.

use chrono::{DateTime, Utc};

use super::domain::{AnswerId, Evaluation, EvaluationStatus, ScorePair};
use super::narrative::{CompetencyAnalysis, NarrativeSource, NarrativeState};
use super::scoring::{self, is_self_complete, progress_percent};

/// Longest accepted per-answer comment.
pub const ANSWER_COMMENT_MAX: usize = 500;
/// Longest accepted closing comment.
pub const FINAL_COMMENT_MAX: usize = 1000;

/// Everything that can happen to an evaluation after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationEvent {
    SelfRated {
        answer_id: AnswerId,
        rating: u8,
        comment: Option<String>,
    },
    ManagerRated {
        answer_id: AnswerId,
        rating: u8,
        comment: Option<String>,
    },
    CollaboratorCommented {
        text: String,
    },
    ManagerCommented {
        text: String,
    },
    Submitted {
        at: DateTime<Utc>,
    },
    Validated {
        at: DateTime<Utc>,
    },
    NarrativeRequested,
    NarrativeAttached {
        analysis: CompetencyAnalysis,
        generated_at: DateTime<Utc>,
        source: NarrativeSource,
    },
    NarrativeUnavailable,
}

/// Rejected transitions. These are caller mistakes surfaced as validation
/// messages, not engine failures: the score computation itself never errors.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("answer '{0}' does not belong to this evaluation")]
    UnknownAnswer(String),
    #[error("rating {0} is out of the accepted 1-5 range")]
    RatingOutOfRange(u8),
    #[error("comment exceeds the {limit}-character limit")]
    CommentTooLong { limit: usize },
    #[error("self-assessment answers are locked once the evaluation is submitted")]
    SelfTrackLocked,
    #[error("cannot submit: self-assessment is {progress}% complete")]
    IncompleteSelfAssessment { progress: u8 },
    #[error("evaluation is {status} and cannot accept this event", status = .0.label())]
    InvalidStatus(EvaluationStatus),
}

/// Apply one event, returning the next evaluation state.
pub fn apply(
    evaluation: &Evaluation,
    event: EvaluationEvent,
) -> Result<Evaluation, TransitionError> {
    let mut next = evaluation.clone();

    match event {
        EvaluationEvent::SelfRated {
            answer_id,
            rating,
            comment,
        } => {
            if next.status != EvaluationStatus::Draft {
                return Err(TransitionError::SelfTrackLocked);
            }
            check_rating(rating)?;
            let comment = check_comment(comment, ANSWER_COMMENT_MAX)?;
            let answer = find_answer(&mut next, &answer_id)?;
            answer.self_rating = rating;
            if comment.is_some() {
                answer.self_comment = comment;
            }
        }
        EvaluationEvent::ManagerRated {
            answer_id,
            rating,
            comment,
        } => {
            if next.status == EvaluationStatus::Validated {
                return Err(TransitionError::InvalidStatus(next.status));
            }
            check_rating(rating)?;
            let comment = check_comment(comment, ANSWER_COMMENT_MAX)?;
            let answer = find_answer(&mut next, &answer_id)?;
            answer.manager_rating = Some(rating);
            if comment.is_some() {
                answer.manager_comment = comment;
            }
        }
        EvaluationEvent::CollaboratorCommented { text } => {
            if next.status != EvaluationStatus::Draft {
                return Err(TransitionError::SelfTrackLocked);
            }
            next.final_comments.collaborator = check_comment(Some(text), FINAL_COMMENT_MAX)?;
        }
        EvaluationEvent::ManagerCommented { text } => {
            if next.status == EvaluationStatus::Validated {
                return Err(TransitionError::InvalidStatus(next.status));
            }
            next.final_comments.manager = check_comment(Some(text), FINAL_COMMENT_MAX)?;
        }
        EvaluationEvent::Submitted { at } => {
            if next.status != EvaluationStatus::Draft {
                return Err(TransitionError::InvalidStatus(next.status));
            }
            if !is_self_complete(&next.answers) {
                return Err(TransitionError::IncompleteSelfAssessment {
                    progress: progress_percent(&next.answers),
                });
            }
            next.status = EvaluationStatus::Submitted;
            next.timestamps.submitted_at = Some(at);
        }
        EvaluationEvent::Validated { at } => {
            if next.status != EvaluationStatus::Submitted {
                return Err(TransitionError::InvalidStatus(next.status));
            }
            next.status = EvaluationStatus::Validated;
            next.timestamps.validated_at = Some(at);
        }
        EvaluationEvent::NarrativeRequested => {
            next.narrative = NarrativeState::Pending;
        }
        EvaluationEvent::NarrativeAttached {
            analysis,
            generated_at,
            source,
        } => {
            next.narrative = NarrativeState::Ready {
                analysis,
                generated_at,
                source,
            };
        }
        EvaluationEvent::NarrativeUnavailable => {
            if matches!(next.narrative, NarrativeState::Pending) {
                next.narrative = NarrativeState::Absent;
            }
        }
    }

    next.scores = ScorePair {
        self_assessment: scoring::self_scores(&next.answers),
        manager_assessment: scoring::manager_scores(&next.answers),
    };

    Ok(next)
}

fn check_rating(rating: u8) -> Result<(), TransitionError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(TransitionError::RatingOutOfRange(rating))
    }
}

fn check_comment(
    comment: Option<String>,
    limit: usize,
) -> Result<Option<String>, TransitionError> {
    match comment {
        Some(text) if text.chars().count() > limit => {
            Err(TransitionError::CommentTooLong { limit })
        }
        other => Ok(other.filter(|text| !text.is_empty())),
    }
}

fn find_answer<'a>(
    evaluation: &'a mut Evaluation,
    answer_id: &AnswerId,
) -> Result<&'a mut super::domain::Answer, TransitionError> {
    evaluation
        .answers
        .iter_mut()
        .find(|answer| &answer.id == answer_id)
        .ok_or_else(|| TransitionError::UnknownAnswer(answer_id.0.clone()))
}
