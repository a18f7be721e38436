use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

/// Liveness state: reports whether each credential is present, never whether
/// it is valid.
#[derive(Clone)]
pub struct HealthState {
    pub catalog_configured: bool,
    pub llm_configured: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiKeyStatus {
    pub catalog: &'static str,
    pub llm: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub api_status: ApiKeyStatus,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "brickchat",
        api_status: ApiKeyStatus {
            catalog: configured_label(state.catalog_configured),
            llm: configured_label(state.llm_configured),
        },
        checked_at: Utc::now().to_rfc3339(),
    })
}

fn configured_label(configured: bool) -> &'static str {
    if configured {
        "configured"
    } else {
        "not_configured"
    }
}
