//! Interpretation orchestrator
//!
//! Single decision point for turning free text into a draft:
//!
//! - no backend configured -> fallback parser
//! - backend configured -> one extraction attempt; success -> AI draft,
//!   any failure -> fallback parser plus a human-readable reason
//!
//! AI failures are absorbed here and never surface as errors to the
//! caller; the only hard rejection is input that fails validation before
//! either extractor runs.

use tracing::{debug, warn};

use crate::ai::{AIBackend, AIClient};
use crate::error::{Error, Result};
use crate::fallback;
use crate::models::Draft;

/// Which path produced the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpretationSource {
    Ai,
    Fallback,
}

/// A draft plus provenance. `warning` is set whenever the fallback path
/// was taken, so callers can tell the user the result is lower-confidence.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Interpretation {
    pub draft: Draft,
    pub source: InterpretationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Orchestrates AI extraction with a guaranteed fallback
pub struct Interpreter {
    ai: Option<AIClient>,
}

impl Interpreter {
    pub fn new(ai: Option<AIClient>) -> Self {
        Self { ai }
    }

    /// Build from environment configuration; without one, interpretation
    /// runs on the fallback parser alone.
    pub fn from_env() -> Self {
        Self::new(AIClient::from_env())
    }

    pub fn has_ai(&self) -> bool {
        self.ai.is_some()
    }

    /// Interpret one free-text transaction description.
    ///
    /// Fails only on validation (empty input, or input that looks like
    /// several transactions at once); otherwise always yields a draft.
    pub async fn interpret(&self, text: &str) -> Result<Interpretation> {
        validate_input(text)?;

        let ai = match &self.ai {
            Some(ai) => ai,
            None => {
                debug!("No AI backend configured, using fallback parser");
                return Ok(Interpretation {
                    draft: fallback::extract(text),
                    source: InterpretationSource::Fallback,
                    warning: Some(
                        "AI parsing not configured - using fallback parser".to_string(),
                    ),
                });
            }
        };

        match ai.extract_transaction(text).await {
            Ok(draft) => Ok(Interpretation {
                draft,
                source: InterpretationSource::Ai,
                warning: None,
            }),
            Err(err) => {
                warn!(error = %err, model = %ai.model(), "AI extraction failed, using fallback parser");
                Ok(Interpretation {
                    draft: fallback::extract(text),
                    source: InterpretationSource::Fallback,
                    warning: Some(format!(
                        "AI parsing failed ({}) - using fallback parser",
                        err
                    )),
                })
            }
        }
    }
}

/// Reject malformed input before any extraction attempt.
///
/// Three or more quote characters mean more than one quoted segment; the
/// engine does not attempt to split multi-transaction input.
fn validate_input(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::Validation("transaction text is empty".to_string()));
    }
    if text.matches('"').count() >= 3 {
        return Err(Error::Validation(
            "input looks like multiple transactions; submit one transaction at a time"
                .to_string(),
        ));
    }
    Ok(())
}
