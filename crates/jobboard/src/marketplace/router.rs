use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::catalog::ListingCatalog;
use super::domain::{ArticleId, ListingCard, ListingId, OrganizationId};
use super::filter::{filter_listings, Facet, FilterSelection};
use super::navigation::{reduce, render, render_path, Action, BrowseState, Page};
use crate::error::AppError;

/// Query string accepted by the listing search endpoint. Facet values are comma separated.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub q: Option<String>,
    pub occupation: Option<String>,
    pub language: Option<String>,
    pub industry: Option<String>,
    pub area: Option<String>,
    pub characteristic: Option<String>,
}

impl ListingQuery {
    pub fn into_selection(self) -> FilterSelection {
        let facets = [
            (Facet::Occupation, self.occupation),
            (Facet::Language, self.language),
            (Facet::Industry, self.industry),
            (Facet::Area, self.area),
            (Facet::Characteristic, self.characteristic),
        ];

        facets.into_iter().fold(
            FilterSelection::default().with_query(self.q.unwrap_or_default()),
            |selection, (facet, raw)| match raw {
                Some(raw) => selection.with_values(facet, split_values(&raw)),
                None => selection,
            },
        )
    }
}

fn split_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ListingSearchResponse {
    pub total: usize,
    pub selection: FilterSelection,
    pub listings: Vec<ListingCard>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    #[serde(default)]
    pub state: BrowseState,
    pub action: Action,
}

#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub state: BrowseState,
    pub page: Page,
}

/// Router builder exposing catalog lookups, search, and page resolution.
pub fn browse_router<C>(catalog: Arc<C>) -> Router
where
    C: ListingCatalog + 'static,
{
    Router::new()
        .route("/api/v1/listings", get(search_handler::<C>))
        .route("/api/v1/listings/:listing_id", get(listing_handler::<C>))
        .route(
            "/api/v1/organizations/:organization_id",
            get(organization_handler::<C>),
        )
        .route("/api/v1/articles/:article_id", get(article_handler::<C>))
        .route("/api/v1/pages", get(page_handler::<C>))
        .route("/api/v1/browse/dispatch", post(dispatch_handler::<C>))
        .with_state(catalog)
}

pub(crate) async fn search_handler<C>(
    State(catalog): State<Arc<C>>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingSearchResponse>, AppError>
where
    C: ListingCatalog + 'static,
{
    let selection = query.into_selection();
    let listings = catalog.listings()?;
    let cards: Vec<ListingCard> = filter_listings(&listings, &selection)
        .into_iter()
        .map(|listing| listing.card())
        .collect();
    debug!(matched = cards.len(), total = listings.len(), "listing search");

    Ok(Json(ListingSearchResponse {
        total: cards.len(),
        selection,
        listings: cards,
    }))
}

pub(crate) async fn listing_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(listing_id): Path<String>,
) -> Result<Response, AppError>
where
    C: ListingCatalog + 'static,
{
    let id = ListingId(listing_id);
    Ok(match catalog.listing(&id)? {
        Some(listing) => (StatusCode::OK, Json(listing)).into_response(),
        None => not_found("listing", id.as_str()),
    })
}

pub(crate) async fn organization_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(organization_id): Path<String>,
) -> Result<Response, AppError>
where
    C: ListingCatalog + 'static,
{
    let id = OrganizationId(organization_id);
    let Some(organization) = catalog.organization(&id)? else {
        return Ok(not_found("organization", id.as_str()));
    };
    let listings: Vec<ListingCard> = catalog
        .listings_for_organization(&id)?
        .iter()
        .map(|listing| listing.card())
        .collect();

    let payload = json!({
        "organization": organization,
        "listings": listings,
    });
    Ok((StatusCode::OK, Json(payload)).into_response())
}

pub(crate) async fn article_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(article_id): Path<String>,
) -> Result<Response, AppError>
where
    C: ListingCatalog + 'static,
{
    let id = ArticleId(article_id);
    Ok(match catalog.article(&id)? {
        Some(article) => (StatusCode::OK, Json(article)).into_response(),
        None => not_found("article", id.as_str()),
    })
}

/// Unknown paths degrade to a not-found page rather than an HTTP error.
pub(crate) async fn page_handler<C>(
    State(catalog): State<Arc<C>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page>, AppError>
where
    C: ListingCatalog + 'static,
{
    let page = render_path(&query.path, catalog.as_ref())?;
    Ok(Json(page))
}

pub(crate) async fn dispatch_handler<C>(
    State(catalog): State<Arc<C>>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<DispatchResponse>, AppError>
where
    C: ListingCatalog + 'static,
{
    let state = reduce(request.state, request.action);
    let page = render(&state, catalog.as_ref())?;
    Ok(Json(DispatchResponse { state, page }))
}

fn not_found(resource: &str, id: &str) -> Response {
    let payload = json!({
        "error": format!("{resource} {id} not found"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::catalog::InMemoryCatalog;
    use crate::marketplace::navigation::{PageBody, Route};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        browse_router(Arc::new(InMemoryCatalog::sample()))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[test]
    fn listing_query_splits_comma_separated_facets() {
        let query = ListingQuery {
            q: Some("開発".to_string()),
            language: Some("Go, Rust,,".to_string()),
            characteristic: Some("時給1500円以上".to_string()),
            ..ListingQuery::default()
        };
        let selection = query.into_selection();
        assert_eq!(selection.query, "開発");
        assert_eq!(selection.languages.len(), 2);
        assert!(selection.languages.contains("Rust"));
        assert_eq!(selection.characteristics.len(), 1);
        assert!(selection.areas.is_empty());
    }

    #[tokio::test]
    async fn search_handler_applies_wage_characteristic() {
        let query = ListingQuery {
            characteristic: Some("時給1500円以上".to_string()),
            ..ListingQuery::default()
        };
        let Json(body) = search_handler(
            State(Arc::new(InMemoryCatalog::sample())),
            Query(query),
        )
        .await
        .expect("search succeeds");

        let ids: Vec<&str> = body.listings.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, vec!["job-001", "job-003", "job-004", "job-007", "job-009"]);
        assert_eq!(body.total, 5);
    }

    #[tokio::test]
    async fn listing_route_returns_not_found_json() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/listings/job-missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let payload = read_json(response).await;
        assert!(payload["error"].as_str().unwrap().contains("job-missing"));
    }

    #[tokio::test]
    async fn page_route_degrades_unknown_paths() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/pages?path=/company/dashboard/org-fincore")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["chrome"], json!("company"));
        assert_eq!(payload["body"]["kind"], json!("company_dashboard"));

        let response = router()
            .oneshot(
                Request::get("/api/v1/pages?path=/no/such/page")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["body"]["kind"], json!("not_found"));
    }

    #[tokio::test]
    async fn dispatch_route_reduces_and_renders() {
        let body = json!({
            "state": { "selection": { "query": "Go" } },
            "action": { "type": "navigate", "route": { "route": "job_detail", "listing_id": "job-001" } }
        });
        let response = router()
            .oneshot(
                Request::post("/api/v1/browse/dispatch")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["state"]["route"]["route"], json!("job_detail"));
        assert_eq!(payload["state"]["history"], json!([{ "route": "home" }]));
        assert_eq!(payload["state"]["selection"]["query"], json!("Go"));
        assert_eq!(payload["page"]["body"]["kind"], json!("job_detail"));
    }

    #[tokio::test]
    async fn dispatch_handler_back_preserves_selection() {
        let state = BrowseState {
            route: Route::job("job-001"),
            history: vec![Route::Home],
            selection: FilterSelection::default().with_query("Go"),
        };
        let Json(response) = dispatch_handler(
            State(Arc::new(InMemoryCatalog::sample())),
            Json(DispatchRequest {
                state,
                action: Action::Back,
            }),
        )
        .await
        .expect("dispatch succeeds");

        assert_eq!(response.state.route, Route::Home);
        assert_eq!(response.state.selection.query, "Go");
        match response.page.body {
            PageBody::Home { total, .. } => assert_eq!(total, 1),
            other => panic!("expected home page, got {other:?}"),
        }
    }
}
