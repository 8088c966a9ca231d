//! Data models for transactions and analytics results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    /// Parse the wire/storage tag. Anything else is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INCOME" => Some(TransactionType::Income),
            "EXPENSE" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unpersisted, fully-normalized candidate transaction produced by
/// interpretation. Invariants (upheld by both interpreters):
/// `category` is a registry member, `confidence` is in [0, 1], and
/// `tx_type` is always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub confidence: f64,
    pub date: DateTime<Utc>,
}

/// A persisted transaction, owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a transaction. Only supplied fields change;
/// `updated_at` is always refreshed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub tx_type: Option<TransactionType>,
    pub date: Option<DateTime<Utc>>,
}

/// One row of the per-category expense report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Income/expense/savings totals across all of a user's transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// One (year, month, type) bucket of the monthly trend series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_round_trips_through_tag() {
        assert_eq!(TransactionType::parse("INCOME"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse("EXPENSE"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("income"), None);
        assert_eq!(TransactionType::parse("all"), None);
        assert_eq!(TransactionType::Income.as_str(), "INCOME");
    }

    #[test]
    fn draft_serializes_type_with_wire_tag() {
        let draft = Draft {
            amount: 6.5,
            currency: "USD".to_string(),
            category: "Food & Dining".to_string(),
            description: "Coffee".to_string(),
            tx_type: TransactionType::Expense,
            confidence: 0.3,
            date: Utc::now(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "EXPENSE");
        assert_eq!(json["amount"], 6.5);
    }
}
