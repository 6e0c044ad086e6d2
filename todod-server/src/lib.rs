//! todod-server: to-do CRUD over a session-scoped storage layer
//!
//! Exposes a minimal HTTP API (list, create, update, delete) backed by a
//! SQLite session pool. Every request runs in exactly one session.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, Session, SessionManager, TodoRepo};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use models::{Todo, TodoDraft};
