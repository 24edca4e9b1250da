//! Persistence for todos.
//!
//! [`TodoStore`] is the whole contract the handlers rely on. Two backends
//! implement it: [`MemoryStore`] for a process-local collection and
//! [`FileStore`] for a JSON document on disk.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::id::TodoId;
use crate::todo::Todo;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Failure of the storage backend itself. "Not found" is never an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt todo document {path:?}: {source}")]
    Corrupt { path: PathBuf, source: serde_json::Error },

    #[error("failed to encode todo document: {0}")]
    Encode(serde_json::Error),

    #[error("store returned a todo without an id")]
    MissingId,
}

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// Upsert. Without an id a fresh one is assigned and the todo inserted;
    /// with an id the record is replaced, or inserted if there was none.
    /// Returns the stored todo, id always set.
    async fn save(&self, todo: Todo) -> Result<Todo, StoreError>;

    /// Idempotent: removing an absent id succeeds.
    async fn delete_by_id(&self, id: TodoId) -> Result<(), StoreError>;

    /// Everything, in insertion order.
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError>;
}

/// Applies an upsert to an ordered collection. A replaced record keeps its
/// position.
fn upsert(todos: &mut Vec<Todo>, todo: Todo) -> Todo {
    let id = todo.id.unwrap_or_else(TodoId::generate);
    let todo = todo.with_id(id);
    match todos.iter_mut().find(|t| t.id == Some(id)) {
        Some(existing) => *existing = todo.clone(),
        None => todos.push(todo.clone()),
    }
    todo
}

/// Removes `id`, reporting whether anything was there.
fn remove(todos: &mut Vec<Todo>, id: TodoId) -> bool {
    let before = todos.len();
    todos.retain(|t| t.id != Some(id));
    todos.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_assigns_id_to_new_todo() {
        let mut todos = Vec::new();

        let saved = upsert(&mut todos, Todo::new("a"));

        assert!(saved.id.is_some());
        assert_eq!(todos, vec![saved]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut todos = Vec::new();
        let a = upsert(&mut todos, Todo::new("a"));
        let b = upsert(&mut todos, Todo::new("b"));

        let a2 = upsert(&mut todos, Todo { title: "a2".into(), ..a.clone() });

        assert_eq!(a2.id, a.id);
        assert_eq!(todos, vec![a2, b]);
    }

    #[test]
    fn upsert_inserts_unknown_id() {
        let mut todos = Vec::new();
        let id = TodoId::generate();

        let saved = upsert(&mut todos, Todo::new("x").with_id(id));

        assert_eq!(saved.id, Some(id));
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut todos = Vec::new();
        let a = upsert(&mut todos, Todo::new("a"));
        let id = a.id.unwrap();

        assert!(remove(&mut todos, id));
        assert!(!remove(&mut todos, id));
        assert!(todos.is_empty());
    }
}
