//! Chat and catalog endpoints.
//!
//! JSON API:
//! - `POST /chat`, `POST /api/chat`          — run a query through the pipeline
//! - `GET  /api/sets/search?query=&page_size=` — free-text set search
//! - `GET  /api/sets/{set_num}`              — direct set lookup
//! - `GET  /api/sets/{set_num}/parts`        — set inventory
//! - `GET  /api/themes`                      — theme listing
//! - `GET  /api/themes/{theme_id}/sets`      — sets within a theme
//! - `GET  /`                                — root liveness message
//!
//! The direct-access endpoints bypass the pipeline and surface catalog
//! failures as HTTP statuses; chat failures stay in-band except for a
//! missing credential.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use brickchat_agent::QueryPipeline;
use brickchat_catalog::CatalogApi;
use brickchat_core::{CatalogError, CatalogItem, ChatResult};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<dyn CatalogApi>,
    pub pipeline: Arc<QueryPipeline>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page_size: Option<u32>,
}

pub fn router(state: ApiState) -> Router {
    // The chat UI is served from a different origin.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/chat", post(chat))
        .route("/api/chat", post(chat))
        .route("/api/sets/search", get(search_sets))
        .route("/api/sets/{set_num}", get(get_set))
        .route("/api/sets/{set_num}/parts", get(get_set_parts))
        .route("/api/themes", get(get_themes))
        .route("/api/themes/{theme_id}/sets", get(get_theme_sets))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK", "message": "brickchat server is running" }))
}

pub async fn chat(
    State(state): State<ApiState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResult>, (StatusCode, Json<ApiError>)> {
    let correlation_id = Uuid::new_v4().simple().to_string();
    info!(
        event_name = "chat.query.received",
        correlation_id = %correlation_id,
        "chat query received"
    );

    match state.pipeline.handle(&body.query).await {
        Ok(result) => {
            info!(
                event_name = "chat.query.answered",
                correlation_id = %correlation_id,
                resolved_set = result.set_info.is_some(),
                "chat query answered"
            );
            Ok(Json(result))
        }
        Err(error) => {
            error!(
                event_name = "chat.query.failed",
                correlation_id = %correlation_id,
                error = %error,
                "chat query failed"
            );
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError { error: error.to_string() })))
        }
    }
}

async fn get_set(
    Path(set_num): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<CatalogItem>, (StatusCode, Json<ApiError>)> {
    state.catalog.get_set(&set_num).await.map(Json).map_err(catalog_error)
}

async fn search_sets(
    Query(params): Query<SearchParams>,
    State(state): State<ApiState>,
) -> Json<serde_json::Value> {
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    let results = state.catalog.search_sets(&params.query, page_size).await;
    Json(serde_json::json!({ "results": results }))
}

async fn get_set_parts(
    Path(set_num): Path<String>,
    State(state): State<ApiState>,
) -> Json<serde_json::Value> {
    let results = state.catalog.get_parts(&set_num).await;
    Json(serde_json::json!({ "results": results }))
}

async fn get_themes(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let results = state.catalog.get_themes().await;
    Json(serde_json::json!({ "results": results }))
}

async fn get_theme_sets(
    Path(theme_id): Path<u32>,
    Query(params): Query<PageParams>,
    State(state): State<ApiState>,
) -> Json<serde_json::Value> {
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    let results = state.catalog.get_sets_by_theme(theme_id, page_size).await;
    Json(serde_json::json!({ "results": results }))
}

fn catalog_error(error: CatalogError) -> (StatusCode, Json<ApiError>) {
    let status = match &error {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError { error: error.to_string() }))
}
