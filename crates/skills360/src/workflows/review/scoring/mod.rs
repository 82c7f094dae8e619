//! Pure score computation for the two rating tracks.
//!
//! Every function here is synchronous, side-effect-free, and total: empty
//! answer sets, unanswered categories, and a manager track with no data at
//! all each map to a defined value rather than an error, because these
//! computations run on every rating change.

mod progress;
mod rules;

pub use progress::{is_manager_complete, is_self_complete, progress_percent};

use serde::{Deserialize, Serialize};

use super::domain::{AiLevel, Answer, ScoreDetail, SkillCategory};
use rules::{ai_competency_score, category_score, round2};

/// Which rating field a computation reads from each answer.
///
/// Historical revisions of the scoring code disagreed on whether a missing
/// manager rating silently fell back to the self rating; the choice is an
/// explicit policy here so every call site states what it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSource {
    SelfAssessment,
    ManagerOnly,
    ManagerWithSelfFallback,
}

impl RatingSource {
    /// The rating this source extracts from an answer, if the answer
    /// qualifies for inclusion under this source.
    pub(crate) fn rating(self, answer: &Answer) -> Option<u8> {
        match self {
            RatingSource::SelfAssessment => answer.is_self_rated().then_some(answer.self_rating),
            RatingSource::ManagerOnly => answer.manager_rating.filter(|r| (1..=5).contains(r)),
            RatingSource::ManagerWithSelfFallback => answer
                .manager_rating
                .filter(|r| (1..=5).contains(r))
                .or_else(|| answer.is_self_rated().then_some(answer.self_rating)),
        }
    }

    /// Manager-sourced computations return the not-applicable sentinel when
    /// the manager has not rated anything yet.
    const fn requires_manager_data(self) -> bool {
        matches!(
            self,
            RatingSource::ManagerOnly | RatingSource::ManagerWithSelfFallback
        )
    }
}

/// Compute the full score snapshot for one rating track.
///
/// Returns `None` only for manager-sourced tracks when no answer carries a
/// manager rating, distinguishing "manager hasn't started" from "manager
/// rated everything low". Otherwise every field is a well-formed number in
/// [0, 100], with 0 standing in for categories that have no qualifying
/// answer under the selected source.
pub fn compute_scores(answers: &[Answer], source: RatingSource) -> Option<ScoreDetail> {
    if source.requires_manager_data() && !answers.iter().any(Answer::is_manager_rated) {
        return None;
    }

    let soft_skills = category_score(answers, SkillCategory::SoftSkills, source);
    let hard_skills = category_score(answers, SkillCategory::HardSkills, source);
    let performance_project = category_score(answers, SkillCategory::PerformanceProject, source);
    let ai_competencies = ai_competency_score(answers, source);

    // Unweighted mean of the three category scores; the AI sub-score is
    // reported separately and never folds into the total.
    let total = round2((soft_skills + hard_skills + performance_project) / 3.0);

    Some(ScoreDetail {
        soft_skills,
        hard_skills,
        performance_project,
        ai_competencies,
        total,
        ai_level: AiLevel::from_score(ai_competencies),
    })
}

/// Self-track scores. Always well-formed: an evaluation with nothing rated
/// yet scores 0 everywhere.
pub fn self_scores(answers: &[Answer]) -> ScoreDetail {
    compute_scores(answers, RatingSource::SelfAssessment).unwrap_or_else(ScoreDetail::zeroed)
}

/// Manager-track scores, or `None` while the manager has not rated anything.
pub fn manager_scores(answers: &[Answer]) -> Option<ScoreDetail> {
    compute_scores(answers, RatingSource::ManagerOnly)
}
