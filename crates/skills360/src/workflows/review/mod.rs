//! 360-degree skills review workflow: data model, score engine, completion
//! predicates, state transitions, question catalog, repository contract,
//! HTTP surface, and the narrative-analysis port.

pub mod domain;
pub mod narrative;
pub(crate) mod profile;
pub mod questions;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub use domain::{
    AiLevel, Answer, AnswerId, Collaborator, Evaluation, EvaluationId, EvaluationStatus,
    EvaluationTimestamps, FinalComments, Role, ScoreDetail, ScorePair, Seniority, SkillCategory,
};
pub use narrative::{
    CompetencyAnalysis, DisabledAnalyst, GeminiAnalyst, NarrativeAnalyst, NarrativeError,
    NarrativeReply, NarrativeSource, NarrativeState,
};
pub use profile::ProfileViolation;
pub use repository::{EvaluationRepository, EvaluationView, RepositoryError};
pub use router::evaluation_router;
pub use scoring::{
    compute_scores, is_manager_complete, is_self_complete, manager_scores, progress_percent,
    self_scores, RatingSource,
};
pub use service::{EvaluationService, EvaluationServiceError};
pub use state::{apply, EvaluationEvent, TransitionError};
