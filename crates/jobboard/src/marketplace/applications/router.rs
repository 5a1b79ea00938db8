use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission};
use super::repository::{ApplicationNotifier, ApplicationRepository, RepositoryError};
use super::service::{ApplicationService, ApplicationServiceError};
use crate::marketplace::catalog::ListingCatalog;
use crate::marketplace::domain::OrganizationId;

/// Body accepted by the status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// Router builder exposing HTTP endpoints for intake and company review.
pub fn application_router<C, R, N>(service: Arc<ApplicationService<C, R, N>>) -> Router
where
    C: ListingCatalog + 'static,
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<C, R, N>))
        .route(
            "/api/v1/applications/:application_id",
            get(status_handler::<C, R, N>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            put(transition_handler::<C, R, N>),
        )
        .route(
            "/api/v1/organizations/:organization_id/applications",
            get(organization_applications_handler::<C, R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<C, R, N>(
    State(service): State<Arc<ApplicationService<C, R, N>>>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<C, R, N>(
    State(service): State<Arc<ApplicationService<C, R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn transition_handler<C, R, N>(
    State(service): State<Arc<ApplicationService<C, R, N>>>,
    Path(application_id): Path<String>,
    axum::Json(update): axum::Json<StatusUpdate>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.transition(&ApplicationId(application_id), update.status) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn organization_applications_handler<C, R, N>(
    State(service): State<Arc<ApplicationService<C, R, N>>>,
    Path(organization_id): Path<String>,
) -> Response
where
    C: ListingCatalog + 'static,
    R: ApplicationRepository + 'static,
    N: ApplicationNotifier + 'static,
{
    match service.for_organization(&OrganizationId(organization_id)) {
        Ok(records) => {
            let payload = json!({
                "total": records.len(),
                "applications": records,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: ApplicationServiceError) -> Response {
    let status = match &err {
        ApplicationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::UnknownListing(_)
        | ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::InvalidTransition { .. }
        | ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Catalog(_)
        | ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
