use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{StoreError, TodoStore, remove, upsert};
use crate::id::TodoId;
use crate::todo::Todo;

/// One entry of the on-disk document. Unlike the API representation, the
/// document carries the id.
#[derive(Serialize, Deserialize)]
struct Record {
    id: TodoId,
    title: String,
}

/// Store backed by a single JSON document: an array of `{"id", "title"}`
/// records.
///
/// The whole collection is held in memory; each mutation rewrites the file
/// through a temporary sibling that is synced to disk before it is renamed
/// over the document, so a crash leaves either the old or the new document.
/// An existing but empty file is reported as corrupt rather than read as an
/// empty collection. The in-memory state only changes once the write has
/// succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    todos: RwLock<Vec<Todo>>,
}

impl FileStore {
    /// Loads `path`, or starts empty if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let todos = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let records: Vec<Record> = serde_json::from_slice(&bytes)
                    .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;
                records.into_iter()
                    .map(|r| Todo::new(r.title).with_id(r.id))
                    .collect()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        info!(path = ?path, count = todos.len(), "opened todo document");
        Ok(Self { path, todos: RwLock::new(todos) })
    }

    async fn persist(&self, todos: &[Todo]) -> Result<(), StoreError> {
        let records: Vec<Record> = todos.iter()
            .map(|t| {
                let id = t.id.ok_or(StoreError::MissingId)?;
                Ok(Record { id, title: t.title.clone() })
            })
            .collect::<Result<_, StoreError>>()?;
        let bytes = serde_json::to_vec_pretty(&records).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = ?self.path, count = todos.len(), "wrote todo document");
        Ok(())
    }
}

#[async_trait]
impl TodoStore for FileStore {
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn save(&self, todo: Todo) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let mut next = todos.clone();
        let saved = upsert(&mut next, todo);
        self.persist(&next).await?;
        *todos = next;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), StoreError> {
        let mut todos = self.todos.write().await;
        let mut next = todos.clone();
        if remove(&mut next, id) {
            self.persist(&next).await?;
            *todos = next;
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.read().await.clone())
    }
}
