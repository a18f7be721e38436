use std::sync::Arc;

use axum::Router;
use brickchat_agent::{LlmClient, OpenAiChatClient, PriceEstimator, QueryPipeline};
use brickchat_catalog::{CatalogApi, RebrickableClient};
use brickchat_core::config::{AppConfig, ConfigError};
use brickchat_core::CatalogError;
use thiserror::Error;
use tracing::info;

use crate::api::{self, ApiState};
use crate::health::{self, HealthState};

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog client construction failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("llm client construction failed: {0}")]
    Llm(String),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let catalog: Arc<dyn CatalogApi> = Arc::new(RebrickableClient::new(&config.catalog)?);

    let llm: Option<Arc<dyn LlmClient>> = if config.llm_configured() {
        let client = OpenAiChatClient::new(&config.llm)
            .map_err(|error| BootstrapError::Llm(error.to_string()))?;
        info!(
            event_name = "system.bootstrap.llm_enabled",
            correlation_id = "bootstrap",
            model = %config.llm.model,
            "model-backed estimator enabled"
        );
        Some(Arc::new(client))
    } else {
        info!(
            event_name = "system.bootstrap.llm_disabled",
            correlation_id = "bootstrap",
            "no llm credential configured; using heuristic estimator"
        );
        None
    };

    let pipeline = Arc::new(QueryPipeline::new(catalog.clone(), PriceEstimator::new(llm)));

    let router = api::router(ApiState { catalog, pipeline }).merge(health::router(HealthState {
        catalog_configured: config.catalog_configured(),
        llm_configured: config.llm_configured(),
    }));

    Ok(Application { config, router })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use brickchat_core::config::AppConfig;
    use tower::util::ServiceExt;

    use crate::bootstrap::bootstrap_with_config;

    #[tokio::test]
    async fn bootstrap_succeeds_without_any_credentials() {
        let app = bootstrap_with_config(AppConfig::default())
            .expect("bootstrap should succeed with defaults");
        assert!(!app.config.catalog_configured());
        assert!(!app.config.llm_configured());
    }

    #[tokio::test]
    async fn bootstrapped_router_serves_the_health_endpoint() {
        let app = bootstrap_with_config(AppConfig::default()).expect("bootstrap should succeed");

        let request = Request::builder().uri("/health").body(Body::empty()).expect("request");
        let response = app.router.oneshot(request).await.expect("handler should run");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("decode body");
        assert_eq!(payload["status"], "healthy");
        assert_eq!(payload["api_status"]["catalog"], "not_configured");
        assert_eq!(payload["api_status"]["llm"], "not_configured");
    }

    #[tokio::test]
    async fn llm_credential_switches_the_estimator_strategy_on() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("test-key".to_string().into());

        let app = bootstrap_with_config(config).expect("bootstrap should succeed");
        assert!(app.config.llm_configured());
    }
}
