//! Transaction CRUD, scoped by owning user
//!
//! Update and delete match on `(id, user_id)` together; a record owned by
//! someone else is indistinguishable from one that does not exist.

use chrono::Utc;
use rusqlite::{params, Row};

use super::transaction_filter::{TransactionFilter, MAX_LIST_LIMIT};
use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Draft, Transaction, TransactionType, TransactionUpdate};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, amount, currency, type, category, description, date, created_at, updated_at";

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let type_str: String = row.get(4)?;
    let tx_type = TransactionType::parse(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown transaction type: {}", type_str).into(),
        )
    })?;

    let date: String = row.get(7)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        currency: row.get(3)?,
        tx_type,
        category: row.get(5)?,
        description: row.get(6)?,
        date: parse_datetime(&date),
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// Insert a confirmed draft for the given user, returning the new id
    pub fn insert_transaction(&self, user_id: &str, draft: &Draft) -> Result<i64> {
        let conn = self.conn()?;
        let now = format_datetime(&Utc::now());

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, currency, type, category, description, date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                draft.amount,
                draft.currency,
                draft.tx_type.as_str(),
                draft.category,
                draft.description,
                format_datetime(&draft.date),
                now,
                now,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Fetch a single transaction owned by the given user
    pub fn get_transaction(&self, id: i64, user_id: &str) -> Result<Transaction> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE id = ? AND user_id = ?",
            TRANSACTION_COLUMNS
        );
        conn.query_row(&sql, params![id, user_id], row_to_transaction)
            .map_err(|err| match err {
                rusqlite::Error::QueryReturnedNoRows => {
                    Error::NotFound(format!("transaction {}", id))
                }
                other => Error::Database(other),
            })
    }

    /// Apply a partial update to a transaction owned by the given user.
    /// Only supplied fields change; `updated_at` is always refreshed.
    pub fn update_transaction(
        &self,
        id: i64,
        user_id: &str,
        update: &TransactionUpdate,
    ) -> Result<()> {
        let conn = self.conn()?;

        let mut sets = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(amount) = update.amount {
            sets.push("amount = ?");
            values.push(Box::new(amount));
        }
        if let Some(ref currency) = update.currency {
            sets.push("currency = ?");
            values.push(Box::new(currency.clone()));
        }
        if let Some(ref category) = update.category {
            sets.push("category = ?");
            values.push(Box::new(category.clone()));
        }
        if let Some(ref description) = update.description {
            sets.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(tx_type) = update.tx_type {
            sets.push("type = ?");
            values.push(Box::new(tx_type.as_str().to_string()));
        }
        if let Some(date) = update.date {
            sets.push("date = ?");
            values.push(Box::new(format_datetime(&date)));
        }

        sets.push("updated_at = ?");
        values.push(Box::new(format_datetime(&Utc::now())));

        values.push(Box::new(id));
        values.push(Box::new(user_id.to_string()));

        let sql = format!(
            "UPDATE transactions SET {} WHERE id = ? AND user_id = ?",
            sets.join(", ")
        );
        let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let matched = conn.execute(&sql, refs.as_slice())?;

        if matched == 0 {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    /// Delete a transaction owned by the given user
    pub fn delete_transaction(&self, id: i64, user_id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("transaction {}", id)));
        }
        Ok(())
    }

    /// List transactions matching a filter, newest first, capped at
    /// [`MAX_LIST_LIMIT`]
    pub fn list_transactions(&self, filter: TransactionFilter<'_>) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let result = filter.build();

        let sql = format!(
            "SELECT {} FROM transactions {} {} LIMIT {}",
            TRANSACTION_COLUMNS, result.where_clause, result.order_clause, MAX_LIST_LIMIT
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(result.params_refs().as_slice(), row_to_transaction)?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?);
        }
        Ok(transactions)
    }
}
