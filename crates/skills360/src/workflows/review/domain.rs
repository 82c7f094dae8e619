use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::narrative::NarrativeState;

/// Identifier wrapper for evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Identifier wrapper for answer instances, stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub String);

/// Job profiles the question catalog is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    GraphicIntegrator,
    Developer,
    TechLead,
    LeadDev,
    TechnicalReferent,
    BusinessAnalyst,
    ProjectManager,
    Pmo,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::GraphicIntegrator => "Graphic Integrator",
            Role::Developer => "Developer",
            Role::TechLead => "Tech Lead",
            Role::LeadDev => "Lead Dev",
            Role::TechnicalReferent => "Technical Referent",
            Role::BusinessAnalyst => "Business Analyst",
            Role::ProjectManager => "Project Manager",
            Role::Pmo => "PMO",
        }
    }
}

/// Seniority tiers used to contextualize the narrative analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Confirmed,
    Senior,
}

impl Seniority {
    pub const fn label(self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::Confirmed => "Confirmed",
            Seniority::Senior => "Senior",
        }
    }
}

/// Collaborator profile captured when an evaluation campaign starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub seniority: Seniority,
    pub joined_on: NaiveDate,
    pub last_evaluation_on: Option<NaiveDate>,
}

/// The three fixed groupings used for category-level scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    SoftSkills,
    HardSkills,
    PerformanceProject,
}

impl SkillCategory {
    pub const fn label(self) -> &'static str {
        match self {
            SkillCategory::SoftSkills => "Soft Skills",
            SkillCategory::HardSkills => "Hard Skills",
            SkillCategory::PerformanceProject => "Project Performance",
        }
    }
}

/// One rated question instance within an evaluation.
///
/// The prompt text is a snapshot taken when the evaluation was initialized;
/// the question catalog may change later without retroactively altering past
/// evaluations. A `self_rating` of 0 means "not yet rated", while an absent
/// `manager_rating` means "not yet reviewed" rather than a zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: String,
    pub category: SkillCategory,
    pub text: String,
    pub is_ai_skill: bool,
    pub self_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_comment: Option<String>,
}

impl Answer {
    pub fn is_self_rated(&self) -> bool {
        (1..=5).contains(&self.self_rating)
    }

    pub fn is_manager_rated(&self) -> bool {
        matches!(self.manager_rating, Some(rating) if (1..=5).contains(&rating))
    }
}

/// Proficiency tier derived from the AI sub-score by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl AiLevel {
    /// Thresholds are inclusive of their lower bound, evaluated descending.
    pub fn from_score(ai_competencies: f64) -> Self {
        if ai_competencies >= 80.0 {
            AiLevel::Expert
        } else if ai_competencies >= 60.0 {
            AiLevel::Advanced
        } else if ai_competencies >= 40.0 {
            AiLevel::Intermediate
        } else {
            AiLevel::Beginner
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AiLevel::Beginner => "Beginner",
            AiLevel::Intermediate => "Intermediate",
            AiLevel::Advanced => "Advanced",
            AiLevel::Expert => "Expert",
        }
    }
}

/// Computed snapshot of category scores, total, AI sub-score, and tier for
/// one rating track. Holds no identity of its own: it is recomputed from the
/// answer set on every change and replaced, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub soft_skills: f64,
    pub hard_skills: f64,
    pub performance_project: f64,
    pub ai_competencies: f64,
    pub total: f64,
    pub ai_level: AiLevel,
}

impl ScoreDetail {
    pub fn zeroed() -> Self {
        Self {
            soft_skills: 0.0,
            hard_skills: 0.0,
            performance_project: 0.0,
            ai_competencies: 0.0,
            total: 0.0,
            ai_level: AiLevel::Beginner,
        }
    }
}

/// Score pair for the two independent rating tracks. The manager assessment
/// stays absent until at least one manager rating exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub self_assessment: ScoreDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_assessment: Option<ScoreDetail>,
}

/// Free-text closing comments for each side of the review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalComments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

/// Lifecycle status of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Submitted,
    Validated,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "draft",
            EvaluationStatus::Submitted => "submitted",
            EvaluationStatus::Validated => "validated",
        }
    }
}

/// Creation, submission, and validation instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTimestamps {
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<DateTime<Utc>>,
}

/// A full evaluation: collaborator profile, ordered answers, derived scores,
/// closing comments, optional narrative enrichment, and lifecycle metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub collaborator: Collaborator,
    pub answers: Vec<Answer>,
    pub scores: ScorePair,
    pub final_comments: FinalComments,
    pub narrative: NarrativeState,
    pub status: EvaluationStatus,
    pub timestamps: EvaluationTimestamps,
}
