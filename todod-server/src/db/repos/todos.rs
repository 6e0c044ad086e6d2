//! Data access for to-dos
//!
//! Every operation runs inside a caller-provided [`Session`]; the repository
//! never acquires or releases sessions on its own.

use crate::db::session::{DbError, Session};
use crate::models::{Todo, TodoDraft};

pub struct TodoRepo<'a> {
    session: &'a mut Session,
}

impl<'a> TodoRepo<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// List every to-do, ordered by id.
    pub async fn list(&mut self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, title, done FROM todos ORDER BY id")
            .fetch_all(self.session.conn())
            .await?;
        Ok(todos)
    }

    /// Insert a new to-do and return it with its assigned id.
    pub async fn create(&mut self, draft: TodoDraft) -> Result<Todo, DbError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title, done) VALUES (?, ?) RETURNING id, title, done",
        )
        .bind(draft.title)
        .bind(draft.done)
        .fetch_one(self.session.conn())
        .await?;
        Ok(todo)
    }

    /// Replace the title and done flag of an existing to-do.
    ///
    /// Returns `None` when no record has the given id.
    pub async fn update(&mut self, id: i64, draft: TodoDraft) -> Result<Option<Todo>, DbError> {
        let todo = sqlx::query_as::<_, Todo>(
            "UPDATE todos SET title = ?, done = ? WHERE id = ? RETURNING id, title, done",
        )
        .bind(draft.title)
        .bind(draft.done)
        .bind(id)
        .fetch_optional(self.session.conn())
        .await?;
        Ok(todo)
    }

    /// Delete a to-do. Returns whether a record was actually removed.
    pub async fn delete(&mut self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.session.conn())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
