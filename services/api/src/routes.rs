use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryCompanyNotifier};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use jobboard::marketplace::applications::{application_router, ApplicationService};
use jobboard::marketplace::browse_router;
use jobboard::marketplace::catalog::InMemoryCatalog;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) type MarketplaceService =
    ApplicationService<InMemoryCatalog, InMemoryApplicationRepository, InMemoryCompanyNotifier>;

/// Browse, search, and application endpoints plus health and metrics endpoints.
pub(crate) fn marketplace_routes(
    catalog: Arc<InMemoryCatalog>,
    applications: Arc<MarketplaceService>,
) -> Router {
    browse_router(catalog)
        .merge(application_router(applications))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
