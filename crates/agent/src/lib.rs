pub mod conversation;
pub mod estimator;
pub mod llm;
pub mod pipeline;

pub use estimator::PriceEstimator;
pub use llm::{LlmClient, OpenAiChatClient};
pub use pipeline::QueryPipeline;
