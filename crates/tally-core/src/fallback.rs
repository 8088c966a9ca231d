//! Deterministic fallback extractor
//!
//! Converts free text into a [`Draft`] with keyword and regex rules only.
//! This path is total: any input, including an empty string, produces a
//! usable draft. Results are marked with a fixed low confidence so callers
//! can tell them apart from AI-sourced drafts.

use chrono::Utc;
use regex::Regex;

use crate::categories::OTHER_CATEGORY;
use crate::models::{Draft, TransactionType};

/// Confidence assigned to every fallback draft.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Optional currency symbol, digits, up to two decimal places.
const AMOUNT_PATTERN: &str = r"\$?(\d+(?:\.\d{1,2})?)";

/// Words that indicate money coming in. Only consulted when no expense
/// indicator matched.
const INCOME_KEYWORDS: &[&str] = &[
    "salary", "payment", "income", "earned", "freelance", "bonus", "refund", "deposit",
];

/// Ordered category table; the first category whose keyword list matches
/// wins. The union of these lists doubles as the expense indicator set.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &["coffee", "lunch", "dinner", "breakfast", "restaurant", "food", "meal", "starbucks"],
    ),
    (
        "Transportation",
        &["gas", "uber", "taxi", "bus", "train", "fuel", "parking", "station"],
    ),
    (
        "Shopping",
        &["grocery", "walmart", "target", "amazon", "clothes", "shopping"],
    ),
    ("Entertainment", &["movie", "concert", "game", "entertainment"]),
    ("Healthcare", &["doctor", "medicine", "pharmacy", "medical", "health"]),
    ("Utilities", &["electricity", "water", "internet", "phone", "bill"]),
];

/// Extract a draft from free text. Never fails.
pub fn extract(text: &str) -> Draft {
    let lower = text.to_lowercase();

    Draft {
        amount: extract_amount(text),
        currency: "USD".to_string(),
        category: detect_category(&lower),
        description: clean_description(text),
        tx_type: classify_type(&lower),
        confidence: FALLBACK_CONFIDENCE,
        date: Utc::now(),
    }
}

/// First amount-looking substring, or 0 if none.
fn extract_amount(text: &str) -> f64 {
    Regex::new(AMOUNT_PATTERN)
        .ok()
        .and_then(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
        })
        .unwrap_or(0.0)
}

/// Expense keywords take priority over income keywords: ambiguous input
/// defaults toward the more common case. Anything matching neither set
/// is treated as an expense.
fn classify_type(lower: &str) -> TransactionType {
    let is_expense = CATEGORY_KEYWORDS
        .iter()
        .flat_map(|(_, words)| words.iter())
        .any(|kw| lower.contains(kw));
    if is_expense {
        return TransactionType::Expense;
    }
    if INCOME_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return TransactionType::Income;
    }
    TransactionType::Expense
}

/// First matching category in table order, or "Other".
fn detect_category(lower: &str) -> String {
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return (*category).to_string();
        }
    }
    OTHER_CATEGORY.to_string()
}

/// Trim the input and strip a single pair of surrounding quotes. If more
/// quoted segments remain, keep only the first one; splitting multiple
/// transactions out of one input is deliberately not attempted.
fn clean_description(text: &str) -> String {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix('"')
        .or_else(|| trimmed.strip_prefix('\''))
        .unwrap_or(trimmed);
    let stripped = stripped
        .strip_suffix('"')
        .or_else(|| stripped.strip_suffix('\''))
        .unwrap_or(stripped);

    if stripped.contains('"') {
        let segments: Vec<&str> = stripped.split('"').collect();
        if segments.len() > 2 {
            let first = segments[1].trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::is_known_category;

    #[test]
    fn coffee_at_starbucks() {
        let draft = extract("Coffee at Starbucks $6.50");
        assert_eq!(draft.amount, 6.50);
        assert_eq!(draft.tx_type, TransactionType::Expense);
        assert_eq!(draft.category, "Food & Dining");
        assert_eq!(draft.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.description, "Coffee at Starbucks $6.50");
    }

    #[test]
    fn empty_input_still_yields_a_draft() {
        let draft = extract("");
        assert_eq!(draft.amount, 0.0);
        assert_eq!(draft.tx_type, TransactionType::Expense);
        assert_eq!(draft.category, "Other");
    }

    #[test]
    fn salary_is_income() {
        let draft = extract("Monthly salary deposit $3000");
        assert_eq!(draft.amount, 3000.0);
        assert_eq!(draft.tx_type, TransactionType::Income);
    }

    #[test]
    fn expense_keywords_win_over_income_keywords() {
        // "refund" is an income indicator but "lunch" marks an expense;
        // expense indicators take priority.
        let draft = extract("Refund for lunch $12");
        assert_eq!(draft.tx_type, TransactionType::Expense);
        assert_eq!(draft.category, "Food & Dining");
    }

    #[test]
    fn amount_without_decimals() {
        assert_eq!(extract("Uber ride $25").amount, 25.0);
        assert_eq!(extract("paid 40 for gas").amount, 40.0);
    }

    #[test]
    fn first_amount_wins() {
        assert_eq!(extract("Dinner $30 tip $5").amount, 30.0);
    }

    #[test]
    fn category_table_order_is_respected() {
        // "gas" (Transportation) appears before any Shopping keyword.
        assert_eq!(extract("gas and grocery run").category, "Transportation");
    }

    #[test]
    fn unknown_text_maps_to_other() {
        let draft = extract("misc stuff 12.34");
        assert_eq!(draft.category, "Other");
        assert_eq!(draft.amount, 12.34);
    }

    #[test]
    fn surrounding_quotes_are_stripped() {
        assert_eq!(extract("\"Coffee $5\"").description, "Coffee $5");
        assert_eq!(extract("'Coffee $5'").description, "Coffee $5");
    }

    #[test]
    fn multiple_quoted_segments_keep_only_the_first() {
        let draft = extract("\"Coffee $5\" and \"Lunch $10\"");
        assert_eq!(draft.description, "and");
        // Outer quotes stripped first, then the first inner quoted
        // segment is retained.
        let draft = extract("x \"Coffee $5\" y \"Lunch $10\" z");
        assert_eq!(draft.description, "Coffee $5");
    }

    #[test]
    fn invariants_hold_for_arbitrary_inputs() {
        for text in [
            "",
            "   ",
            "!!!",
            "salary refund lunch $1.999",
            "a very long unrelated sentence with no numbers",
            "$$$$",
            "\"\"\"\"",
        ] {
            let draft = extract(text);
            assert!(is_known_category(&draft.category));
            assert!((0.0..=1.0).contains(&draft.confidence));
        }
    }
}
