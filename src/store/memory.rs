use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoStore, remove, upsert};
use crate::id::TodoId;
use crate::todo::Todo;

/// Process-local store. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn save(&self, todo: Todo) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(upsert(&mut todos, todo))
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), StoreError> {
        let mut todos = self.todos.write().await;
        remove(&mut todos, id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_todo_can_be_found() {
        let store = MemoryStore::new();

        for title in ["", "Learn Rust", "ünïcødé ✓", "  padded  "] {
            let saved = store.save(Todo::new(title)).await.unwrap();

            assert_eq!(saved.title, title);
            let id = saved.id.expect("id assigned");
            assert_eq!(store.find_by_id(id).await.unwrap(), Some(saved));
        }
    }

    #[tokio::test]
    async fn modified_todo_replaces_stored_one() {
        let store = MemoryStore::new();
        let saved = store.save(Todo::new("before")).await.unwrap();
        let to_modify = Todo { title: "after".into(), ..saved.clone() };

        let modified = store.save(to_modify.clone()).await.unwrap();

        assert_eq!(modified, to_modify);
        assert_eq!(store.find_by_id(saved.id.unwrap()).await.unwrap(), Some(modified));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_id_is_none() {
        let store = MemoryStore::new();

        assert_eq!(store.find_by_id(TodoId::generate()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryStore::new();
        let id = store.save(Todo::new("x")).await.unwrap().id.unwrap();

        store.delete_by_id(id).await.unwrap();
        store.delete_by_id(id).await.unwrap();

        assert_eq!(store.find_by_id(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        let a = store.save(Todo::new("a")).await.unwrap();
        let b = store.save(Todo::new("b")).await.unwrap();
        let c = store.save(Todo::new("c")).await.unwrap();

        assert_eq!(store.find_all().await.unwrap(), vec![a, b, c]);
    }
}
