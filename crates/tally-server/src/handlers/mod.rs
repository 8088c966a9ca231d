//! Request handlers

mod analytics;
mod transactions;

pub use analytics::{category_totals, monthly_trends, spending_summary};
pub use transactions::{
    create_transaction, delete_transaction, list_transactions, parse_transaction,
    update_transaction,
};

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::AppState;

/// GET /api/health - Liveness probe plus AI availability
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "ai": state.interpreter.has_ai(),
    }))
}
