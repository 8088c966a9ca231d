//! Mock backend for testing
//!
//! Returns a canned completion (or a canned failure) so interpretation can
//! be exercised without a running model server. Responses flow through the
//! same parse/normalize path as real completions.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::Draft;

use super::parsing::parse_draft;
use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Raw completion text returned for every request
    response: String,
    /// When true, every extraction fails with an upstream error
    fail: bool,
    /// Whether health_check should return true
    pub healthy: bool,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock that answers with a plausible fixed extraction
    pub fn new() -> Self {
        Self {
            response: r#"{"amount": 6.5, "currency": "USD", "category": "Food & Dining",
                "description": "Coffee at Starbucks", "type": "EXPENSE", "confidence": 0.9}"#
                .to_string(),
            fail: false,
            healthy: true,
        }
    }

    /// Create a mock that returns the given raw completion text
    pub fn with_response(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail: false,
            healthy: true,
        }
    }

    /// Create a mock whose extractions always fail
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            healthy: false,
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn extract_transaction(&self, text: &str) -> Result<Draft> {
        if self.fail {
            return Err(Error::Upstream("mock backend set to fail".to_string()));
        }
        parse_draft(&self.response, text)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://local"
    }
}
