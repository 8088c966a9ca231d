//! OpenAI-compatible backend implementation
//!
//! Works with any server that implements the OpenAI chat completions API:
//! - api.openai.com (hosted, needs `OPENAI_API_KEY`)
//! - vLLM (http://localhost:8000)
//! - LocalAI (http://localhost:8080)
//! - llama-server / llama.cpp (http://localhost:8080)
//!
//! One blocking call per interpretation request, with a bounded timeout on
//! the HTTP client; a timed-out call surfaces as an error like any other
//! failure and the interpreter falls back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::categories::CATEGORIES;
use crate::error::{Error, Result};
use crate::models::Draft;

use super::parsing::parse_draft;
use super::AIBackend;

/// Hosted OpenAI endpoint used when no explicit host is configured.
const DEFAULT_HOST: &str = "https://api.openai.com";

/// Default model for the hosted service.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Upper bound on a single completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI-compatible chat-completion backend
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl Clone for OpenAICompatibleBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

impl OpenAICompatibleBackend {
    /// Create a new backend without an API key (local servers)
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }

    /// Create with an API key (hosted services)
    pub fn with_api_key(base_url: &str, model: &str, api_key: &str) -> Self {
        let mut backend = Self::new(base_url, model);
        backend.api_key = Some(api_key.to_string());
        backend
    }

    /// Create from environment variables
    ///
    /// Returns None when neither `OPENAI_COMPATIBLE_HOST` nor
    /// `OPENAI_API_KEY` is set, i.e. no backend is configured at all.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OPENAI_COMPATIBLE_HOST").ok();
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        if host.is_none() && api_key.is_none() {
            return None;
        }

        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let model =
            std::env::var("OPENAI_COMPATIBLE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let mut backend = Self::new(&host, &model);
        backend.api_key = api_key;
        Some(backend)
    }

    /// System instruction sent with every extraction request, embedding
    /// the category registry.
    fn system_prompt() -> String {
        format!(
            "You are a transaction parser. Extract: amount(number), currency(string default \"USD\"), \
             category(one of: {}), description(string), type(\"INCOME\"|\"EXPENSE\"), \
             confidence(0-1), date(ISO string or empty). \
             Return ONLY JSON without code fences.",
            CATEGORIES.join(", ")
        )
    }

    /// Make a chat completion request
    async fn chat_completion(&self, user_text: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Input: \"{}\"\nReturn JSON only.", user_text),
                },
            ],
            temperature: 0.0,
            stream: false,
        };

        let mut req_builder = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Chat completion API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Upstream("No choices in chat completion response".into()))
    }
}

#[async_trait]
impl AIBackend for OpenAICompatibleBackend {
    async fn extract_transaction(&self, text: &str) -> Result<Draft> {
        debug!(model = %self.model, "Requesting AI transaction extraction");
        let response = self.chat_completion(text).await?;
        parse_draft(&response, text)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/v1/models", self.base_url);
        let mut req = self.http_client.get(&url);
        if let Some(ref api_key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }
        matches!(req.send().await, Ok(resp) if resp.status().is_success())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

/// Chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

/// Single choice in the response
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

/// Message in a response choice
#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_embeds_every_category() {
        let prompt = OpenAICompatibleBackend::system_prompt();
        for category in CATEGORIES {
            assert!(prompt.contains(category), "missing {}", category);
        }
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let backend = OpenAICompatibleBackend::new("http://localhost:8000/", "test-model");
        assert_eq!(backend.host(), "http://localhost:8000");
        assert_eq!(backend.model(), "test-model");
    }
}
