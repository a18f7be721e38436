use std::time::Duration;

use async_trait::async_trait;
use brickchat_core::config::CatalogConfig;
use brickchat_core::{CatalogError, CatalogItem, PartListing, Theme};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

const PARTS_PAGE_SIZE: u32 = 1000;
const THEMES_PAGE_SIZE: u32 = 500;

/// HTTP client for the Rebrickable v3 API.
pub struct RebrickableClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

/// Upstream list envelope.
#[derive(Debug, Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

impl RebrickableClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| CatalogError::Config(format!("failed to build http client: {err}")))?;

        let mut base_url = config.base_url.trim_end_matches('/').to_string();
        base_url.push('/');

        Ok(Self { http, base_url, api_key: config.api_key.clone() })
    }

    fn auth_key(&self) -> Result<&str, CatalogError> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CatalogError::Config("catalog API key is not set".to_string()))
    }

    async fn fetch_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        let key = self.auth_key()?;
        let url = format!("{}{path}", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("key {key}"))
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::not_found(resource));
        }
        if !status.is_success() {
            return Err(CatalogError::Unavailable(format!(
                "catalog API returned status {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| CatalogError::Unavailable(format!("invalid catalog response: {err}")))
    }

    /// Empty-on-failure list fetch. See the [`crate::CatalogApi`] contract.
    async fn list<T>(&self, path: &str, query: &[(&str, String)]) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        match self.fetch_json::<Page<T>>(path, query, path).await {
            Ok(page) => page.results,
            Err(error) => {
                warn!(
                    event_name = "catalog.list_failed",
                    path = %path,
                    error = %error,
                    "catalog list call failed; returning empty results"
                );
                Vec::new()
            }
        }
    }
}

fn transport_error(error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Unavailable("request timed out".to_string())
    } else {
        CatalogError::Unavailable(format!("request failed: {error}"))
    }
}

#[async_trait]
impl crate::CatalogApi for RebrickableClient {
    async fn get_set(&self, set_num: &str) -> Result<CatalogItem, CatalogError> {
        self.fetch_json(&format!("sets/{set_num}/"), &[], set_num).await
    }

    async fn search_sets(&self, query: &str, page_size: u32) -> Vec<CatalogItem> {
        self.list(
            "sets/",
            &[("search", query.to_string()), ("page_size", page_size.to_string())],
        )
        .await
    }

    async fn get_parts(&self, set_num: &str) -> Vec<PartListing> {
        self.list(
            &format!("sets/{set_num}/parts/"),
            &[("page_size", PARTS_PAGE_SIZE.to_string())],
        )
        .await
    }

    async fn get_themes(&self) -> Vec<Theme> {
        self.list("themes/", &[("page_size", THEMES_PAGE_SIZE.to_string())]).await
    }

    async fn get_sets_by_theme(&self, theme_id: u32, page_size: u32) -> Vec<CatalogItem> {
        self.list(
            "sets/",
            &[("theme_id", theme_id.to_string()), ("page_size", page_size.to_string())],
        )
        .await
    }
}
