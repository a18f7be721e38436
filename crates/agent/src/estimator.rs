use std::sync::Arc;

use brickchat_core::pricing::{fallback_estimate, format_price, heuristic_estimate};
use brickchat_core::EstimationContext;
use chrono::{Datelike, Utc};
use tracing::warn;

use crate::llm::LlmClient;

/// Produces the price estimate text for a resolved set.
///
/// With a model client the estimate is delegated to the model; a single
/// failed call falls back to the flat per-piece formula without retrying.
/// Without a model client the deterministic heuristic is used directly.
pub struct PriceEstimator {
    llm: Option<Arc<dyn LlmClient>>,
}

impl PriceEstimator {
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    pub fn heuristic_only() -> Self {
        Self { llm: None }
    }

    pub async fn estimate(&self, context: &EstimationContext, query: &str) -> String {
        let Some(llm) = &self.llm else {
            return heuristic_response(context);
        };

        let prompt = build_prompt(context, query);
        match llm.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(
                    event_name = "estimator.model_empty_response",
                    "model returned an empty completion; using fallback estimate"
                );
                fallback_response(context)
            }
            Err(error) => {
                warn!(
                    event_name = "estimator.model_call_failed",
                    error = %error,
                    "model call failed; using fallback estimate"
                );
                fallback_response(context)
            }
        }
    }
}

fn build_prompt(context: &EstimationContext, query: &str) -> String {
    let mut context_line =
        format!("Pieces: {}, Year: {}", context.num_parts, context.year);
    if let Some(theme_id) = context.theme_id {
        context_line.push_str(&format!(", Theme: {theme_id}"));
    }
    format!("Based on this context: {context_line}, answer: {query}")
}

fn heuristic_response(context: &EstimationContext) -> String {
    let current_year = Utc::now().year();
    let estimate = heuristic_estimate(context.num_parts, context.year, current_year);
    format!(
        "Estimated value: ~{} based on {} pieces from {}.",
        format_price(estimate),
        context.num_parts,
        context.year
    )
}

fn fallback_response(context: &EstimationContext) -> String {
    let estimate = fallback_estimate(context.num_parts);
    format!("Estimated price: ~{} (quick estimate from piece count)", format_price(estimate))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use brickchat_core::pricing::{format_price, heuristic_estimate};
    use brickchat_core::EstimationContext;
    use chrono::{Datelike, Utc};

    use super::{build_prompt, PriceEstimator};
    use crate::llm::LlmClient;

    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("upstream exploded"))
        }
    }

    struct CannedLlm(&'static str);

    #[async_trait]
    impl LlmClient for CannedLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn falcon_context() -> EstimationContext {
        EstimationContext { num_parts: 7541, year: 2017, theme_id: Some(158) }
    }

    #[tokio::test]
    async fn heuristic_strategy_reports_the_primary_formula() {
        let estimator = PriceEstimator::heuristic_only();
        let response = estimator.estimate(&falcon_context(), "price of 75192").await;

        let expected = heuristic_estimate(7541, 2017, Utc::now().year());
        assert!(response.contains(&format_price(expected)));
        assert!(response.contains("7541"));
    }

    #[tokio::test]
    async fn model_text_is_returned_verbatim_trimmed() {
        let estimator = PriceEstimator::new(Some(Arc::new(CannedLlm("  Around $900.  "))));
        let response = estimator.estimate(&falcon_context(), "price of 75192").await;
        assert_eq!(response, "Around $900.");
    }

    #[tokio::test]
    async fn model_failure_falls_back_to_flat_formula() {
        let estimator = PriceEstimator::new(Some(Arc::new(FailingLlm)));
        let response = estimator.estimate(&falcon_context(), "price of 75192").await;

        // 7541 * 0.12, never the primary heuristic's figure
        assert!(response.contains("$904.92"));
        let primary = format_price(heuristic_estimate(7541, 2017, Utc::now().year()));
        assert!(!response.contains(&primary));
    }

    #[tokio::test]
    async fn blank_model_output_also_falls_back() {
        let estimator = PriceEstimator::new(Some(Arc::new(CannedLlm("   "))));
        let response = estimator.estimate(&falcon_context(), "price of 75192").await;
        assert!(response.contains("$904.92"));
    }

    #[test]
    fn prompt_embeds_context_and_literal_query() {
        let prompt = build_prompt(&falcon_context(), "What's the price of 75192?");
        assert!(prompt.contains("Pieces: 7541"));
        assert!(prompt.contains("Year: 2017"));
        assert!(prompt.contains("Theme: 158"));
        assert!(prompt.ends_with("answer: What's the price of 75192?"));
    }
}
