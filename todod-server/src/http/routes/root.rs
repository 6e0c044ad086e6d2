//! Service welcome endpoint

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// GET / - identify the service
async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the todod API" }))
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(welcome))
}
