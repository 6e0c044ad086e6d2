//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C
//! - Session pool closed on every exit path

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{self, DbError, SessionManager, DEFAULT_MAX_CONNECTIONS};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    /// Storage engine URL (default: sqlite:todos.db)
    pub database_url: String,

    /// Upper bound on pooled sessions
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            database_url: "sqlite:todos.db".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::root::router())
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// Applies migrations, serves until a shutdown signal arrives, and closes
/// the session pool on every exit path.
pub async fn run_server(sessions: SessionManager, config: ServerConfig) -> Result<(), ServerError> {
    let result = migrate_and_serve(&sessions, &config).await;

    // Close the pool even when startup or serving fails.
    sessions.close().await;
    result?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn migrate_and_serve(
    sessions: &SessionManager,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    db::migrations::run(sessions).await?;

    let state = AppState {
        sessions: sessions.clone(),
    };

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Db(#[from] DbError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.database_url, "sqlite:todos.db");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[tokio::test]
    async fn bind_failure_still_closes_the_sessions() {
        let blocker = TcpListener::bind("127.0.0.1:0").await.expect("bind blocker");
        let addr = blocker.local_addr().expect("local addr");

        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("todos.db").display());
        let sessions = SessionManager::connect(&url, 1).await.expect("connect failed");

        let config = ServerConfig {
            bind_addr: addr,
            database_url: url,
            max_connections: 1,
        };

        let err = run_server(sessions.clone(), config)
            .await
            .expect_err("bind should fail");

        assert!(matches!(err, ServerError::Io(_)));
        assert!(sessions.is_closed());
    }
}
