pub mod client;

use async_trait::async_trait;
use brickchat_core::{CatalogError, CatalogItem, PartListing, Theme};

pub use client::RebrickableClient;

/// Access to the upstream set catalog.
///
/// `get_set` reports failures through [`CatalogError`] so callers can branch
/// on the outcome. The list calls return an empty collection on any
/// non-success outcome instead: their failures are non-fatal to every caller,
/// and the error detail is deliberately discarded after being logged.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_set(&self, set_num: &str) -> Result<CatalogItem, CatalogError>;

    async fn search_sets(&self, query: &str, page_size: u32) -> Vec<CatalogItem>;

    async fn get_parts(&self, set_num: &str) -> Vec<PartListing>;

    async fn get_themes(&self) -> Vec<Theme>;

    async fn get_sets_by_theme(&self, theme_id: u32, page_size: u32) -> Vec<CatalogItem>;
}
