//! The todo entity.

use serde::{Deserialize, Serialize};

use crate::id::TodoId;

/// A todo as stored.
///
/// `id` is `None` until the store assigns one on the first save and never
/// changes afterwards. It is skipped by serde: clients never send it and
/// representations only expose it through their self link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(skip)]
    pub id: Option<TodoId>,
    pub title: String,
}

impl Todo {
    /// An unsaved todo.
    pub fn new(title: impl Into<String>) -> Self {
        Self { id: None, title: title.into() }
    }

    pub fn with_id(self, id: TodoId) -> Self {
        Self { id: Some(id), ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializing_ignores_client_supplied_id() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":"65f1c0a2e4b0a1b2c3d4e5f6","title":"Learn Rust"}"#).unwrap();

        assert_eq!(todo, Todo::new("Learn Rust"));
    }

    #[test]
    fn title_is_required() {
        assert!(serde_json::from_str::<Todo>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<Todo>(r#"{"title":null}"#).is_err());
    }

    #[test]
    fn serializes_without_id() {
        let todo = Todo::new("x").with_id(TodoId::generate());

        assert_eq!(serde_json::to_value(&todo).unwrap(), serde_json::json!({ "title": "x" }));
    }
}
