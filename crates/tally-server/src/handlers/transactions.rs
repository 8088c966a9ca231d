//! Transaction handlers: interpretation, CRUD, and filtered listing

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::{resolve_user_key, AppError, AppState};
use tally_core::{
    Draft, Interpretation, Transaction, TransactionFilter, TransactionType, TransactionUpdate,
};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub input: String,
}

/// POST /api/transactions/parse - Interpret free text into a draft
///
/// Always answers with a usable draft (AI-sourced or fallback) except for
/// the explicit multi-transaction rejection, which is a 400.
pub async fn parse_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ParseRequest>,
) -> Result<Json<Interpretation>, AppError> {
    // Identity is resolved even though parsing stores nothing: an
    // unauthenticated caller should learn nothing about the service.
    let _user = resolve_user_key(&headers, &state.config)?;

    let interpretation = state.interpreter.interpret(&req.input).await?;
    Ok(Json(interpretation))
}

/// Confirmed draft submitted for persistence
#[derive(Debug, Deserialize)]
pub struct CreateTransaction {
    pub amount: f64,
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// POST /api/transactions - Persist a confirmed draft
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let user = resolve_user_key(&headers, &state.config)?;

    let draft = Draft {
        amount: req.amount,
        currency: req.currency.unwrap_or_else(|| "USD".to_string()),
        category: req.category,
        description: req.description.unwrap_or_default(),
        tx_type: req.tx_type,
        confidence: 1.0,
        date: req.date.unwrap_or_else(Utc::now),
    };

    let id = state.db.insert_transaction(&user, &draft)?;
    let stored = state.db.get_transaction(id, &user)?;
    info!(id, user = %user, "Transaction created");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Search query (matches description or category)
    pub q: Option<String>,
    /// Filter by category ("all" means no filter)
    pub category: Option<String>,
    /// Filter by type (INCOME or EXPENSE; anything else ignored)
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}

#[derive(serde::Serialize)]
pub struct TransactionListResponse {
    pub items: Vec<Transaction>,
}

/// GET /api/transactions - List transactions, newest first, capped
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let user = resolve_user_key(&headers, &state.config)?;

    let filter = TransactionFilter::new(&user)
        .search(params.q.as_deref())
        .category(params.category.as_deref())
        .tx_type(params.tx_type.as_deref())
        .from(params.from)
        .to(params.to);

    let items = state.db.list_transactions(filter)?;
    Ok(Json(TransactionListResponse { items }))
}

/// PUT /api/transactions/:id - Partial update of an owned transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = resolve_user_key(&headers, &state.config)?;

    state.db.update_transaction(id, &user, &update)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// DELETE /api/transactions/:id - Delete an owned transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = resolve_user_key(&headers, &state.config)?;

    state.db.delete_transaction(id, &user)?;
    info!(id, user = %user, "Transaction deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}
