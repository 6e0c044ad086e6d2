//! Session lifecycle over the storage engine
//!
//! The manager is constructed once at process start and closed at process
//! shutdown. Every inbound request acquires exactly one [`Session`], runs a
//! single repository operation in it, and lets the drop return the
//! underlying connection to the pool.

use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use thiserror::Error;

/// Default maximum connections for the session pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors surfaced by the data-access layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The storage engine could not be reached while connecting or
    /// acquiring a session. Fatal for the current request.
    #[error("storage engine unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    /// Any other failure reported by the storage engine. Propagated
    /// untouched; this layer performs no retries.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Hands out per-request units of work bound to the storage engine.
///
/// Cloning is cheap; all clones share one pool.
#[derive(Clone, Debug)]
pub struct SessionManager {
    pool: SqlitePool,
}

impl SessionManager {
    /// Connect to the storage engine at `database_url`.
    ///
    /// The database file is created when missing. Fails with
    /// [`DbError::Connection`] if the engine is unreachable.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(DbError::Connection)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(DbError::Connection)?;

        Ok(Self { pool })
    }

    /// Acquire a new session.
    ///
    /// Callers must surface a failure here, never suppress it.
    pub async fn acquire(&self) -> Result<Session, DbError> {
        let conn = self.pool.acquire().await.map_err(DbError::Connection)?;
        Ok(Session { conn })
    }

    /// Close the pool, waiting for handed-out sessions to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Whether the pool has been closed.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// One unit of work, scoped to a single request.
///
/// Wraps a pooled connection; dropping the session releases it, so the
/// release happens exactly once on every exit path.
#[derive(Debug)]
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    /// Liveness probe against the storage engine.
    pub async fn ping(&mut self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(self.conn()).await?;
        Ok(())
    }

    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_manager() -> (tempfile::TempDir, SessionManager) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("todos.db").display());
        let sessions = SessionManager::connect(&url, DEFAULT_MAX_CONNECTIONS)
            .await
            .expect("connect failed");
        (dir, sessions)
    }

    #[tokio::test]
    async fn acquire_and_ping() {
        let (_dir, sessions) = temp_manager().await;
        let mut session = sessions.acquire().await.expect("acquire failed");
        session.ping().await.expect("ping failed");
    }

    #[tokio::test]
    async fn connect_fails_for_unreachable_engine() {
        let err = SessionManager::connect("sqlite:/no-such-dir/todos.db", 1)
            .await
            .expect_err("connect should fail");
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    async fn close_marks_the_manager_closed() {
        let (_dir, sessions) = temp_manager().await;
        assert!(!sessions.is_closed());

        sessions.close().await;

        assert!(sessions.is_closed());
        let err = sessions.acquire().await.expect_err("acquire should fail");
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[tokio::test]
    async fn dropped_sessions_return_to_the_pool() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("todos.db").display());
        let sessions = SessionManager::connect(&url, 1)
            .await
            .expect("connect failed");

        let session = sessions.acquire().await.expect("first acquire failed");
        drop(session);

        // A single-connection pool can only satisfy this if the dropped
        // session gave its connection back.
        let _again = sessions.acquire().await.expect("second acquire failed");
    }
}
