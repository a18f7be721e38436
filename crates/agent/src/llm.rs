use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use brickchat_core::config::LlmConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

const SYSTEM_PROMPT: &str = "You are a concise assistant that estimates secondary-market \
     prices for LEGO sets. Answer in one or two sentences.";

/// Chat-completion client for OpenAI-compatible endpoints.
pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| anyhow!("llm API key is required to build a chat client"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&request)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("chat completion API returned status {status}"));
        }

        let body: ChatCompletionResponse =
            response.json().await.context("invalid chat completion response")?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("chat completion response had no choices"))?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use brickchat_core::config::LlmConfig;

    use super::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiChatClient};

    fn config_with_key() -> LlmConfig {
        LlmConfig {
            api_key: Some("test-key".to_string().into()),
            base_url: "https://api.openai.com/v1/".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 15,
            max_tokens: 150,
            temperature: 0.3,
        }
    }

    #[test]
    fn client_requires_an_api_key() {
        let config = LlmConfig { api_key: None, ..config_with_key() };
        assert!(OpenAiChatClient::new(&config).is_err());

        let config = LlmConfig { api_key: Some("  ".to_string().into()), ..config_with_key() };
        assert!(OpenAiChatClient::new(&config).is_err());

        assert!(OpenAiChatClient::new(&config_with_key()).is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenAiChatClient::new(&config_with_key()).expect("client should build");
        assert!(client.base_url.ends_with("/v1"));
    }

    #[test]
    fn request_body_matches_the_chat_completion_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage { role: "user", content: "how much is 75192-1?" }],
            max_tokens: 150,
            temperature: 0.3,
        };

        let encoded = serde_json::to_value(&request).expect("serialize");
        assert_eq!(encoded["model"], "gpt-4o-mini");
        assert_eq!(encoded["messages"][0]["role"], "user");
        assert_eq!(encoded["max_tokens"], 150);
    }

    #[test]
    fn response_content_is_read_from_the_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{
                "id": "chatcmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Around $850."}, "finish_reason": "stop"}
                ]
            }"#,
        )
        .expect("decode");
        assert_eq!(body.choices[0].message.content, "Around $850.");
    }
}
