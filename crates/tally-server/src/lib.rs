//! Tally Web Server
//!
//! Axum-based REST API for the Tally transaction tracker.
//!
//! Every request is an independent, stateless unit of work; the only
//! shared state is the injected [`Database`] handle and the optional AI
//! client, both constructed once at startup. Caller identity is an opaque
//! user key taken from the `X-User-Key` header; with authentication
//! disabled, requests without one resolve to a default local user.

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use tally_core::{AIBackend, AIClient, Database, Error as CoreError, Interpreter};

mod handlers;


/// Header carrying the opaque owning-user key
pub const USER_KEY_HEADER: &str = "x-user-key";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether a user key is required on every request
    pub require_auth: bool,
    /// User key assigned to anonymous requests when auth is disabled
    pub default_user: String,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            default_user: "local".to_string(),
            allowed_origins: vec![],
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub interpreter: Interpreter,
    pub config: ServerConfig,
}

/// Resolve the owning-user key for a request.
///
/// The key itself is opaque; this server never interprets it beyond
/// scoping store operations.
pub(crate) fn resolve_user_key(
    headers: &HeaderMap,
    config: &ServerConfig,
) -> Result<String, AppError> {
    let key = headers
        .get(USER_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match key {
        Some(key) => Ok(key.to_string()),
        None if !config.require_auth => Ok(config.default_user.clone()),
        None => Err(AppError::unauthorized("Missing user key")),
    }
}

/// Build the API router
pub fn create_router(db: Database, ai: Option<AIClient>, config: ServerConfig) -> Router {
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    let state = Arc::new(AppState {
        db,
        interpreter: Interpreter::new(ai),
        config,
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/transactions/parse", post(handlers::parse_transaction))
        .route("/transactions", post(handlers::create_transaction))
        .route("/transactions", get(handlers::list_transactions))
        .route("/transactions/:id", put(handlers::update_transaction))
        .route("/transactions/:id", delete(handlers::delete_transaction))
        .route("/analytics/categories", get(handlers::category_totals))
        .route("/analytics/summary", get(handlers::spending_summary))
        .route("/analytics/trends", get(handlers::monthly_trends));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the server, reading the AI backend configuration from the
/// environment and binding `host:port` until shutdown.
pub async fn serve(db: Database, host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!(
            "Authentication disabled - anonymous requests map to user '{}'",
            config.default_user
        );
    }

    let ai = AIClient::from_env();
    check_ai_connection(ai.as_ref()).await;

    let app = create_router(db, ai, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(ai: Option<&AIClient>) {
    match ai {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "AI backend configured but not reachable: {} - drafts will use the fallback parser",
                    client.host()
                );
            }
        }
        None => {
            info!("No AI backend configured - drafts will use the fallback parser");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::bad_request(&msg),
            CoreError::NotFound(msg) => Self::not_found(&msg),
            // No local fallback exists for persistence; fail closed.
            CoreError::Pool(_) => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "Storage unavailable".to_string(),
                internal: Some(err.into()),
            },
            CoreError::Upstream(_) | CoreError::Http(_) => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: "Upstream service unavailable".to_string(),
                internal: Some(err.into()),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal error occurred".to_string(),
                internal: Some(other.into()),
            },
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
