//! Pluggable AI backend abstraction
//!
//! Turns free text into a structured [`Draft`](crate::models::Draft) by
//! calling a chat-completion service. Any failure here (transport, bad
//! status, unparsable reply) is reported as an error; deciding what to do
//! about it belongs to the [`Interpreter`](crate::interpreter::Interpreter),
//! which falls back to the deterministic parser.
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (`openai_compatible`, `mock`).
//!   Default: openai_compatible
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (default: https://api.openai.com)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name (default: gpt-4o)
//! - `OPENAI_API_KEY`: API key, required for hosted services
//!
//! With neither a host nor an API key set, `AIClient::from_env()` returns
//! `None` and interpretation runs on the fallback parser alone.

mod mock;
mod openai_compatible;
pub mod parsing;

pub use mock::MockBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Draft;

/// Interface implemented by every AI backend
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Extract a structured transaction draft from free text
    async fn extract_transaction(&self, text: &str) -> Result<Draft>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model name (for logging)
    fn model(&self) -> &str;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible chat-completion backend (OpenAI, vLLM, LocalAI,
    /// llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Returns None when no backend is configured; interpretation then
    /// uses the fallback parser only.
    pub fn from_env() -> Option<Self> {
        let backend =
            std::env::var("AI_BACKEND").unwrap_or_else(|_| "openai_compatible".to_string());

        match backend.to_lowercase().as_str() {
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, trying openai_compatible");
                OpenAICompatibleBackend::from_env().map(AIClient::OpenAICompatible)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn extract_transaction(&self, text: &str) -> Result<Draft> {
        match self {
            AIClient::OpenAICompatible(b) => b.extract_transaction(text).await,
            AIClient::Mock(b) => b.extract_transaction(text).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
