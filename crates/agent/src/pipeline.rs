use std::sync::Arc;

use brickchat_catalog::CatalogApi;
use brickchat_core::{CatalogError, ChatResult, EstimationContext, SetSummary};
use tracing::info;

use crate::conversation::{extract_set_number, is_price_query, search_terms};
use crate::estimator::PriceEstimator;

const SUGGESTION_LIMIT: usize = 3;
const SEARCH_PAGE_SIZE: u32 = 5;

const EMPTY_QUERY_PROMPT: &str =
    "Please ask about a LEGO set price (e.g., \"What's the price of 75192-1?\").";
const CAPABILITY_MESSAGE: &str = "I can help you estimate LEGO set prices. Ask me something \
     like \"What is 10179-1 worth?\" and I'll look up the set and estimate its value.";
const NO_SET_NUMBER_MESSAGE: &str = "I couldn't find a set number in your message. Include one \
     like 75192 or 10179-1 and I'll estimate its price.";

/// Classify → extract → fetch → estimate → format.
///
/// Stateless: every call produces exactly one [`ChatResult`]. Catalog
/// failures on the pricing path become in-band messages; only a missing
/// credential ([`CatalogError::Config`]) escapes as an error.
pub struct QueryPipeline {
    catalog: Arc<dyn CatalogApi>,
    estimator: PriceEstimator,
}

impl QueryPipeline {
    pub fn new(catalog: Arc<dyn CatalogApi>, estimator: PriceEstimator) -> Self {
        Self { catalog, estimator }
    }

    pub async fn handle(&self, query: &str) -> Result<ChatResult, CatalogError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(ChatResult::message(EMPTY_QUERY_PROMPT));
        }

        if !is_price_query(trimmed) {
            return Ok(ChatResult::message(CAPABILITY_MESSAGE));
        }

        match extract_set_number(trimmed) {
            Some(set_num) => self.price_set(&set_num, trimmed).await,
            None => Ok(self.suggest_sets(trimmed).await),
        }
    }

    async fn price_set(&self, set_num: &str, query: &str) -> Result<ChatResult, CatalogError> {
        match self.catalog.get_set(set_num).await {
            Ok(item) => {
                let context = EstimationContext::from(&item);
                let response = self.estimator.estimate(&context, query).await;
                let context_line = format!(
                    "Set: {}, Pieces: {}, Year: {}",
                    item.name, item.num_parts, item.year
                );
                info!(
                    event_name = "chat.set_priced",
                    set_num = %item.set_num,
                    num_parts = item.num_parts,
                    "set resolved and priced"
                );
                Ok(ChatResult {
                    response,
                    context: Some(context_line),
                    set_info: Some(SetSummary::from(&item)),
                })
            }
            Err(error @ CatalogError::Config(_)) => Err(error),
            Err(error) => {
                info!(
                    event_name = "chat.set_lookup_failed",
                    set_num = %set_num,
                    error = %error,
                    "set lookup failed; answering in-band"
                );
                Ok(ChatResult::message(error.user_message()))
            }
        }
    }

    async fn suggest_sets(&self, query: &str) -> ChatResult {
        let terms = search_terms(query);
        if terms.is_empty() {
            return ChatResult::message(NO_SET_NUMBER_MESSAGE);
        }

        let results = self.catalog.search_sets(&terms.join(" "), SEARCH_PAGE_SIZE).await;
        if results.is_empty() {
            return ChatResult::message(NO_SET_NUMBER_MESSAGE);
        }

        let mut response = String::from(
            "I couldn't spot a set number in your message. Did you mean one of these?\n",
        );
        for item in results.iter().take(SUGGESTION_LIMIT) {
            response.push_str(&format!("- {} ({})\n", item.name, item.set_num));
        }
        response.push_str("Reply with a set number and I'll estimate its price.");
        ChatResult::message(response)
    }
}
