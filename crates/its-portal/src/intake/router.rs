use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantId, ApplicationSubmission, Region};
use super::repository::{ApplicantSummary, ApplicationRepository, RepositoryError};
use super::service::{IntakeService, IntakeServiceError};

/// Router builder exposing HTTP endpoints for intake, review, and rankings.
pub fn application_router<R>(service: Arc<IntakeService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/applications/:applicant_id", get(details_handler::<R>))
        .route("/api/v1/rankings", get(rankings_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) region: Option<String>,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let summary = ApplicantSummary::from(&record.applicant);
            (StatusCode::CREATED, axum::Json(summary)).into_response()
        }
        Err(error @ IntakeServiceError::Rejected(_)) => {
            let payload = json!({
                "error": "Validation failed",
                "field_errors": error.field_errors(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(
            error @ (IntakeServiceError::DuplicateEmail | IntakeServiceError::DuplicatePhone),
        ) => {
            let payload = json!({
                "error": error.to_string(),
                "field_errors": error.field_errors(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(IntakeServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "application already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let region = match query.region.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(label) => match Region::from_label(label) {
            Some(region) => Some(region),
            None => {
                let payload = json!({
                    "error": format!("unknown region '{label}'"),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    match service.list(region) {
        Ok(applicants) => (StatusCode::OK, axum::Json(applicants)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn details_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicantId(applicant_id);
    match service.details(&id) {
        Ok(details) => (StatusCode::OK, axum::Json(details)).into_response(),
        Err(IntakeServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "applicant_id": id.0,
                "error": "application not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn rankings_handler<R>(State(service): State<Arc<IntakeService<R>>>) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.rankings() {
        Ok(rankings) => (StatusCode::OK, axum::Json(rankings)).into_response(),
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: IntakeServiceError) -> Response {
    tracing::error!(error = %error, "intake request failed");
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
