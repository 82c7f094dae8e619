//! Narrative analysis port.
//!
//! The score engine never depends on this module: narrative enrichment is an
//! optional, asynchronous collaborator whose failure must never block score
//! computation or evaluation submission. Callers fall back to the
//! deterministic rule-based analysis when no backend is available.

pub mod fallback;
mod gemini;
mod prompt;

pub use gemini::GeminiAnalyst;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Evaluation, ScoreDetail};

/// Structured narrative produced for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyAnalysis {
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub priority_recommendations: Vec<String>,
    pub progression_plan: Vec<String>,
    pub detailed_narrative: String,
}

/// Where a narrative came from, kept alongside it for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum NarrativeSource {
    Model(String),
    RuleBased,
}

/// Narrative lifecycle as a tagged variant: absent, pending, or present with
/// its generation timestamp. Replaces the ad hoc nullable fields the data
/// previously carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NarrativeState {
    Absent,
    Pending,
    Ready {
        analysis: CompetencyAnalysis,
        generated_at: DateTime<Utc>,
        source: NarrativeSource,
    },
}

impl NarrativeState {
    pub const fn label(&self) -> &'static str {
        match self {
            NarrativeState::Absent => "absent",
            NarrativeState::Pending => "pending",
            NarrativeState::Ready { .. } => "ready",
        }
    }
}

/// Successful analyst reply, tagging which backend model produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeReply {
    pub analysis: CompetencyAnalysis,
    pub model: String,
}

/// Failures along the narrative path. All of them resolve to "no narrative
/// available" at the call site, never an error on the score path.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative backend not configured")]
    NotConfigured,
    #[error("narrative request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model '{model}' answered with status {status}")]
    Status { model: String, status: u16 },
    #[error("model reply could not be parsed: {0}")]
    MalformedReply(String),
    #[error("all configured models exhausted")]
    Exhausted,
}

/// Async port to an external analysis backend. Implementations may retry
/// across an ordered list of models; callers must tolerate arbitrary latency
/// and must not assume a result.
#[async_trait::async_trait]
pub trait NarrativeAnalyst: Send + Sync {
    async fn analyse(
        &self,
        evaluation: &Evaluation,
        scores: &ScoreDetail,
    ) -> Result<NarrativeReply, NarrativeError>;
}

/// Stand-in analyst used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAnalyst;

#[async_trait::async_trait]
impl NarrativeAnalyst for DisabledAnalyst {
    async fn analyse(
        &self,
        _evaluation: &Evaluation,
        _scores: &ScoreDetail,
    ) -> Result<NarrativeReply, NarrativeError> {
        Err(NarrativeError::NotConfigured)
    }
}
