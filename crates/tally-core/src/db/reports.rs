//! Analytics reports: category totals, spending summary, monthly trends
//!
//! All three are read-only grouping queries over one user's transactions.

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{CategoryTotal, SpendingSummary, TransactionType, TrendPoint};

impl Database {
    /// Expense totals grouped by category, largest first. Categories with
    /// no expense transactions are omitted, not zero-filled.
    pub fn category_totals(&self, user_id: &str) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS total
            FROM transactions
            WHERE user_id = ? AND type = 'EXPENSE'
            GROUP BY category
            ORDER BY total DESC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?;

        let mut totals = Vec::new();
        for row in rows {
            totals.push(row?);
        }
        Ok(totals)
    }

    /// Total income, total expenses, and the savings difference across all
    /// of a user's transactions. A user with no records of a type gets 0
    /// for that side.
    pub fn spending_summary(&self, user_id: &str) -> Result<SpendingSummary> {
        let conn = self.conn()?;
        let (income, expenses): (f64, f64) = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN type = 'INCOME' THEN amount ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN type = 'EXPENSE' THEN amount ELSE 0 END), 0)
            FROM transactions
            WHERE user_id = ?
            "#,
            params![user_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(SpendingSummary {
            income,
            expenses,
            savings: income - expenses,
        })
    }

    /// Per-month totals grouped by (year, month, type), ascending by year
    /// then month. Only non-empty buckets are emitted; type order within a
    /// month is alphabetical, which keeps it stable.
    pub fn monthly_trends(&self, user_id: &str) -> Result<Vec<TrendPoint>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                CAST(strftime('%Y', date) AS INTEGER) AS year,
                CAST(strftime('%m', date) AS INTEGER) AS month,
                type,
                SUM(amount) AS total
            FROM transactions
            WHERE user_id = ?
            GROUP BY year, month, type
            ORDER BY year ASC, month ASC, type ASC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let type_str: String = row.get(2)?;
            let tx_type = TransactionType::parse(&type_str).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    format!("unknown transaction type: {}", type_str).into(),
                )
            })?;
            Ok(TrendPoint {
                year: row.get(0)?,
                month: row.get(1)?,
                tx_type,
                total: row.get(3)?,
            })
        })?;

        let mut trends = Vec::new();
        for row in rows {
            trends.push(row?);
        }
        Ok(trends)
    }
}
