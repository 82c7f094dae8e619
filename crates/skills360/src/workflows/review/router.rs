use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerId, Collaborator, EvaluationId};
use super::repository::{EvaluationRepository, EvaluationView, RepositoryError};
use super::service::{EvaluationService, EvaluationServiceError};
use super::state::EvaluationEvent;

/// Router builder exposing HTTP endpoints for the evaluation workflow.
pub fn evaluation_router<R>(service: Arc<EvaluationService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(start_handler::<R>))
        .route(
            "/api/v1/evaluations/:evaluation_id",
            get(view_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/events",
            post(event_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/narrative",
            post(narrative_handler::<R>),
        )
        .with_state(service)
}

/// Client-facing event payload. Narrative lifecycle events are not
/// accepted here; they are driven by the narrative endpoint.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum EventRequest {
    SelfRating {
        answer_id: String,
        rating: u8,
        #[serde(default)]
        comment: Option<String>,
    },
    ManagerRating {
        answer_id: String,
        rating: u8,
        #[serde(default)]
        comment: Option<String>,
    },
    CollaboratorComment {
        text: String,
    },
    ManagerComment {
        text: String,
    },
    Submit,
    Validate,
}

impl From<EventRequest> for EvaluationEvent {
    fn from(request: EventRequest) -> Self {
        match request {
            EventRequest::SelfRating {
                answer_id,
                rating,
                comment,
            } => EvaluationEvent::SelfRated {
                answer_id: AnswerId(answer_id),
                rating,
                comment,
            },
            EventRequest::ManagerRating {
                answer_id,
                rating,
                comment,
            } => EvaluationEvent::ManagerRated {
                answer_id: AnswerId(answer_id),
                rating,
                comment,
            },
            EventRequest::CollaboratorComment { text } => {
                EvaluationEvent::CollaboratorCommented { text }
            }
            EventRequest::ManagerComment { text } => EvaluationEvent::ManagerCommented { text },
            EventRequest::Submit => EvaluationEvent::Submitted { at: Utc::now() },
            EventRequest::Validate => EvaluationEvent::Validated { at: Utc::now() },
        }
    }
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    axum::Json(collaborator): axum::Json<Collaborator>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.start(collaborator) {
        Ok(evaluation) => {
            let view = EvaluationView::from_evaluation(&evaluation);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service.get(&id) {
        Ok(evaluation) => {
            let view = EvaluationView::from_evaluation(&evaluation);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn event_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
    axum::Json(request): axum::Json<EventRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service.record_event(&id, request.into()) {
        Ok(evaluation) => {
            let view = EvaluationView::from_evaluation(&evaluation);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn narrative_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service.generate_narrative(&id).await {
        Ok(evaluation) => {
            let view = EvaluationView::from_evaluation(&evaluation);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: EvaluationServiceError) -> Response {
    let status = match &error {
        EvaluationServiceError::Profile(_) | EvaluationServiceError::Transition(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EvaluationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EvaluationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        EvaluationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
