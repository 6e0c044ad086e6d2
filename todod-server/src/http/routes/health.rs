//! Health check endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::db::{DbError, SessionManager};
use crate::http::server::AppState;

/// GET /health - report API and storage engine liveness
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match probe_database(&state.sessions).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "components": { "api": "up", "database": "up" }
            })),
        ),
        Err(e) => {
            tracing::error!("Health probe failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "degraded",
                    "components": { "api": "up", "database": "down" },
                    "error": e.to_string()
                })),
            )
        }
    }
}

async fn probe_database(sessions: &SessionManager) -> Result<(), DbError> {
    let mut session = sessions.acquire().await?;
    session.ping().await
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
