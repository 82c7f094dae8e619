use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::prompt::build_prompt;
use super::{CompetencyAnalysis, NarrativeAnalyst, NarrativeError, NarrativeReply};
use crate::config::AnalysisConfig;
use crate::workflows::review::domain::{Evaluation, ScoreDetail};

/// Analyst backed by the Gemini `generateContent` API.
///
/// Models are tried in their configured order: a transport failure, an
/// unavailable model (404), or an unparseable reply moves on to the next
/// model, and only an explicit rejection from the API aborts the sequence.
pub struct GeminiAnalyst {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
}

impl GeminiAnalyst {
    pub fn new(config: &AnalysisConfig) -> Result<Self, NarrativeError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(NarrativeError::NotConfigured)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            models: config.models.clone(),
        })
    }
}

#[async_trait::async_trait]
impl NarrativeAnalyst for GeminiAnalyst {
    async fn analyse(
        &self,
        evaluation: &Evaluation,
        scores: &ScoreDetail,
    ) -> Result<NarrativeReply, NarrativeError> {
        let prompt = build_prompt(evaluation, scores);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        for model in &self.models {
            let url = format!(
                "{}/{}:generateContent?key={}",
                self.base_url, model, self.api_key
            );

            debug!(%model, "requesting narrative analysis");
            let response = match self.client.post(&url).json(&body).send().await {
                Ok(response) => response,
                Err(error) => {
                    warn!(%model, %error, "narrative request failed, trying next model");
                    continue;
                }
            };

            let status = response.status();
            if status == reqwest::StatusCode::NOT_FOUND {
                warn!(%model, "model unavailable, trying next model");
                continue;
            }
            if !status.is_success() {
                return Err(NarrativeError::Status {
                    model: model.clone(),
                    status: status.as_u16(),
                });
            }

            let payload: GenerateResponse = match response.json().await {
                Ok(payload) => payload,
                Err(error) => {
                    warn!(%model, %error, "reply envelope could not be decoded, trying next model");
                    continue;
                }
            };
            let Some(text) = payload.text() else {
                warn!(%model, "reply carried no text, trying next model");
                continue;
            };

            match parse_reply(&text) {
                Ok(analysis) => {
                    return Ok(NarrativeReply {
                        analysis,
                        model: model.clone(),
                    })
                }
                Err(error) => {
                    warn!(%model, %error, "reply could not be parsed, trying next model");
                    continue;
                }
            }
        }

        Err(NarrativeError::Exhausted)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvement_areas: Vec<String>,
    #[serde(default)]
    priority_recommendations: Vec<String>,
    #[serde(default)]
    progression_plan: Vec<String>,
    #[serde(default)]
    detailed_narrative: String,
}

/// Extract the JSON object from a reply that may wrap it in markdown fences
/// or surrounding prose. Missing fields default to empty.
fn parse_reply(text: &str) -> Result<CompetencyAnalysis, NarrativeError> {
    let start = text
        .find('{')
        .ok_or_else(|| NarrativeError::MalformedReply("no JSON object in reply".to_string()))?;
    let end = text
        .rfind('}')
        .ok_or_else(|| NarrativeError::MalformedReply("unterminated JSON object".to_string()))?;
    if end < start {
        return Err(NarrativeError::MalformedReply(
            "unterminated JSON object".to_string(),
        ));
    }

    let raw: RawAnalysis = serde_json::from_str(&text[start..=end])
        .map_err(|error| NarrativeError::MalformedReply(error.to_string()))?;

    Ok(CompetencyAnalysis {
        strengths: raw.strengths,
        improvement_areas: raw.improvement_areas,
        priority_recommendations: raw.priority_recommendations,
        progression_plan: raw.progression_plan,
        detailed_narrative: raw.detailed_narrative,
    })
}
