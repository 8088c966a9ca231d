//! JSON parsing and normalization for AI responses
//!
//! Chat models often wrap the JSON payload in extra prose or code fences,
//! and the fields inside are not guaranteed to be well formed. Parsing is
//! strict (the reply must contain a JSON object with a usable amount) and
//! normalization is total: every other field is repaired by an explicit
//! default rule so the resulting [`Draft`] always satisfies the draft
//! invariants.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::categories::{is_known_category, OTHER_CATEGORY};
use crate::error::{Error, Result};
use crate::models::{Draft, TransactionType};

/// Confidence assigned when the model omits one or reports something
/// non-numeric.
pub const DEFAULT_AI_CONFIDENCE: f64 = 0.5;

/// Parse an AI reply into a normalized draft.
///
/// `input` is the original user text, used as the description of last
/// resort.
pub fn parse_draft(response: &str, input: &str) -> Result<Draft> {
    let value = extract_json(response)?;
    normalize(&value, input)
}

/// Extract the first JSON object from a response that may contain extra
/// text before/after the payload.
fn extract_json(response: &str) -> Result<Value> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                Error::Upstream(format!(
                    "Invalid JSON from AI: {} | Raw: {}",
                    e,
                    preview(json_str)
                ))
            })
        }
        _ => Err(Error::Upstream(format!(
            "No JSON found in AI response | Raw: {}",
            preview(response)
        ))),
    }
}

/// First ~200 bytes of a raw reply for error messages, cut on a char
/// boundary so multibyte text cannot panic the slice.
fn preview(s: &str) -> String {
    const MAX: usize = 200;
    if s.len() <= MAX {
        return s.to_string();
    }
    let mut end = MAX;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Repair field-by-field into a typed draft. A draft without an amount is
/// unusable, so a missing or non-numeric amount fails the parse; every
/// other field has a default rule.
fn normalize(value: &Value, input: &str) -> Result<Draft> {
    let amount = number_field(value, "amount")
        .ok_or_else(|| Error::Upstream("AI response has no numeric amount".to_string()))?;

    let currency = match value.get("currency").and_then(Value::as_str) {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => "USD".to_string(),
    };

    let category = match value.get("category").and_then(Value::as_str) {
        Some(c) if is_known_category(c) => c.to_string(),
        _ => OTHER_CATEGORY.to_string(),
    };

    let description = match value.get("description").and_then(Value::as_str) {
        Some(d) if !d.trim().is_empty() => d.trim().to_string(),
        _ => input.trim().to_string(),
    };

    // Missing or invalid type is inferred from the sign of the amount.
    let tx_type = value
        .get("type")
        .and_then(Value::as_str)
        .and_then(TransactionType::parse)
        .unwrap_or(if amount >= 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        });

    let confidence = number_field(value, "confidence")
        .unwrap_or(DEFAULT_AI_CONFIDENCE)
        .clamp(0.0, 1.0);

    let date = value
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Ok(Draft {
        amount,
        currency,
        category,
        description,
        tx_type,
        confidence,
        date,
    })
}

/// Read a numeric field, accepting JSON numbers or numeric strings.
fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
