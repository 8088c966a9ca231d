//! Transaction filter builder for constructing listing queries
//!
//! Translates the optional query parameters (free-text search, category,
//! type, inclusive date range) into a WHERE clause plus parameters. The
//! owning-user scope is always applied; every other clause is ANDed on
//! top when present.

use chrono::NaiveDate;

use super::format_datetime;
use crate::models::TransactionType;

/// Hard cap on listing results; callers needing more must narrow filters.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Builder for transaction listing filters
///
/// The lifetime `'query` represents how long the filter parameters
/// (user key, search text, etc.) must remain valid.
pub struct TransactionFilter<'query> {
    user_id: &'query str,
    search: Option<&'query str>,
    category: Option<&'query str>,
    tx_type: Option<&'query str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

/// Result of building a filter - SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including the "WHERE" keyword (never empty; the user
    /// scope is always present)
    pub where_clause: String,
    /// ORDER BY clause including the "ORDER BY" keyword
    pub order_clause: &'static str,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a filter scoped to one user
    pub fn new(user_id: &'query str) -> Self {
        Self {
            user_id,
            search: None,
            category: None,
            tx_type: None,
            from: None,
            to: None,
        }
    }

    /// Set search text (matches description or category, case-insensitive)
    pub fn search(mut self, query: Option<&'query str>) -> Self {
        self.search = query;
        self
    }

    /// Set category filter ("all" and blank are treated as absent)
    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    /// Set type filter (anything other than INCOME/EXPENSE is ignored)
    pub fn tx_type(mut self, tx_type: Option<&'query str>) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Set the inclusive lower date bound (00:00:00.000 UTC of that day)
    pub fn from(mut self, from: Option<NaiveDate>) -> Self {
        self.from = from;
        self
    }

    /// Set the inclusive upper date bound (23:59:59.999 UTC of that day)
    pub fn to(mut self, to: Option<NaiveDate>) -> Self {
        self.to = to;
        self
    }

    /// Build the filter components
    pub fn build(self) -> FilterResult {
        let mut conditions = vec!["user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(self.user_id.to_string())];

        if let Some(category) = self.category {
            let category = category.trim();
            if !category.is_empty() && category != "all" {
                conditions.push("category = ?".to_string());
                params.push(Box::new(category.to_string()));
            }
        }

        if let Some(tx_type) = self.tx_type {
            if let Some(parsed) = TransactionType::parse(tx_type) {
                conditions.push("type = ?".to_string());
                params.push(Box::new(parsed.as_str().to_string()));
            }
        }

        if let Some(from) = self.from {
            if let Some(start) = from.and_hms_milli_opt(0, 0, 0, 0) {
                conditions.push("date >= ?".to_string());
                params.push(Box::new(format_datetime(&start.and_utc())));
            }
        }

        if let Some(to) = self.to {
            if let Some(end) = to.and_hms_milli_opt(23, 59, 59, 999) {
                conditions.push("date <= ?".to_string());
                params.push(Box::new(format_datetime(&end.and_utc())));
            }
        }

        if let Some(q) = self.search {
            if !q.trim().is_empty() {
                conditions.push(
                    "(description LIKE ? COLLATE NOCASE OR category LIKE ? COLLATE NOCASE)"
                        .to_string(),
                );
                let pattern = format!("%{}%", q.trim());
                params.push(Box::new(pattern.clone()));
                params.push(Box::new(pattern));
            }
        }

        FilterResult {
            where_clause: format!("WHERE {}", conditions.join(" AND ")),
            order_clause: "ORDER BY date DESC, id DESC",
            params,
        }
    }
}

impl FilterResult {
    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_scope_is_always_present() {
        let result = TransactionFilter::new("u1").build();
        assert_eq!(result.where_clause, "WHERE user_id = ?");
        assert_eq!(result.params.len(), 1);
    }

    #[test]
    fn all_and_blank_category_are_ignored() {
        let result = TransactionFilter::new("u1").category(Some("all")).build();
        assert_eq!(result.where_clause, "WHERE user_id = ?");
        let result = TransactionFilter::new("u1").category(Some("  ")).build();
        assert_eq!(result.where_clause, "WHERE user_id = ?");
        let result = TransactionFilter::new("u1")
            .category(Some("Utilities"))
            .build();
        assert!(result.where_clause.contains("category = ?"));
    }

    #[test]
    fn only_valid_types_are_applied() {
        for ignored in ["all", "income", "whatever"] {
            let result = TransactionFilter::new("u1").tx_type(Some(ignored)).build();
            assert_eq!(result.where_clause, "WHERE user_id = ?", "{}", ignored);
        }
        let result = TransactionFilter::new("u1").tx_type(Some("INCOME")).build();
        assert!(result.where_clause.contains("type = ?"));
    }

    #[test]
    fn date_bounds_expand_to_day_edges() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let result = TransactionFilter::new("u1").from(Some(from)).build();
        assert!(result.where_clause.contains("date >= ?"));
        // One-sided range: no upper bound clause.
        assert!(!result.where_clause.contains("date <= ?"));
    }

    #[test]
    fn search_matches_description_or_category() {
        let result = TransactionFilter::new("u1").search(Some("coffee")).build();
        assert!(result.where_clause.contains("description LIKE ?"));
        assert!(result.where_clause.contains("category LIKE ?"));
        assert_eq!(result.params.len(), 3);
    }
}
