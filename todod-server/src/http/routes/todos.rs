//! To-do endpoints
//!
//! Each handler acquires exactly one session, runs one repository
//! operation in it, and releases the session when the handler returns.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::db::TodoRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{TodoId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Todo, TodoDraft};

/// GET /todos - list all to-dos ordered by id
async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, ApiError> {
    let mut session = state.sessions.acquire().await?;
    let todos = TodoRepo::new(&mut session).list().await?;
    Ok(Json(todos))
}

/// POST /todos - create a new to-do
async fn create_todo(
    State(state): State<Arc<AppState>>,
    ValidJson(draft): ValidJson<TodoDraft>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let mut session = state.sessions.acquire().await?;
    let todo = TodoRepo::new(&mut session).create(draft).await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/{id} - replace the title and done flag of a to-do
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    ValidJson(draft): ValidJson<TodoDraft>,
) -> Result<Json<Todo>, ApiError> {
    let mut session = state.sessions.acquire().await?;
    let todo = TodoRepo::new(&mut session)
        .update(id, draft)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "todo",
            id,
        })?;

    Ok(Json(todo))
}

/// DELETE /todos/{id} - delete a to-do
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<Value>, ApiError> {
    let mut session = state.sessions.acquire().await?;
    let deleted = TodoRepo::new(&mut session).delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound {
            resource: "todo",
            id,
        });
    }

    Ok(Json(json!({ "message": "Deleted" })))
}

/// To-do routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
}
