//! The to-do entity and its write payload

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted to-do item.
///
/// `id` is assigned by the storage layer on creation and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub done: bool,
}

/// Incoming write payload for create and update.
///
/// Updates are full replacements: both fields are applied, never patched
/// individually. `done` defaults to false when the request body omits it,
/// so the repository always receives both values. `title` must be present
/// but may be empty; only presence is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_done_to_false() {
        let draft: TodoDraft = serde_json::from_str(r#"{"title": "Buy milk"}"#).unwrap();
        assert_eq!(draft.title, "Buy milk");
        assert!(!draft.done);
    }

    #[test]
    fn draft_accepts_explicit_done() {
        let draft: TodoDraft = serde_json::from_str(r#"{"title": "x", "done": true}"#).unwrap();
        assert!(draft.done);
    }

    #[test]
    fn draft_requires_title() {
        let result = serde_json::from_str::<TodoDraft>(r#"{"done": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn draft_rejects_non_boolean_done() {
        let result = serde_json::from_str::<TodoDraft>(r#"{"title": "x", "done": "yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn todo_serializes_all_fields() {
        let todo = Todo {
            id: 1,
            title: "Write report".to_string(),
            done: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "Write report", "done": false})
        );
    }
}
