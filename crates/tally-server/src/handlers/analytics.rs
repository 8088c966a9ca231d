//! Analytics handlers

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};

use crate::{resolve_user_key, AppError, AppState};
use tally_core::SpendingSummary;

/// GET /api/analytics/categories - Expense totals per category
pub async fn category_totals(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = resolve_user_key(&headers, &state.config)?;
    let categories = state.db.category_totals(&user)?;
    Ok(Json(serde_json::json!({ "categories": categories })))
}

/// GET /api/analytics/summary - Income, expenses, savings
pub async fn spending_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SpendingSummary>, AppError> {
    let user = resolve_user_key(&headers, &state.config)?;
    Ok(Json(state.db.spending_summary(&user)?))
}

/// GET /api/analytics/trends - Monthly totals per (year, month, type)
pub async fn monthly_trends(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = resolve_user_key(&headers, &state.config)?;
    let trends = state.db.monthly_trends(&user)?;
    Ok(Json(serde_json::json!({ "trends": trends })))
}
