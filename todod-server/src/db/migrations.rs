//! Schema setup, run once at startup before the server accepts traffic

use tracing::info;

use super::session::{DbError, SessionManager};

const CREATE_TODOS: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    done  BOOLEAN NOT NULL DEFAULT 0
)
"#;

/// Apply the schema. The statement is idempotent, so reruns are safe.
pub async fn run(sessions: &SessionManager) -> Result<(), DbError> {
    let mut session = sessions.acquire().await?;

    sqlx::query(CREATE_TODOS).execute(session.conn()).await?;

    info!("database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite:{}", dir.path().join("todos.db").display());
        let sessions = SessionManager::connect(&url, 1)
            .await
            .expect("connect failed");

        run(&sessions).await.expect("first run failed");
        run(&sessions).await.expect("second run failed");

        let mut session = sessions.acquire().await.expect("acquire failed");
        sqlx::query("SELECT id, title, done FROM todos")
            .fetch_all(session.conn())
            .await
            .expect("todos table missing");
    }
}
