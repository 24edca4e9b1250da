//! The todo resource: five handlers over a [`TodoStore`].
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `GET` | `{root}/{id}` | 200 | 400 bad id, 404 |
//! | `POST` | `{root}` | 201 + `location` | 400 bad body |
//! | `PUT` | `{root}/{id}` | 200 | 400 bad id or body, 404 |
//! | `DELETE` | `{root}/{id}` | 204 | 400 bad id |
//! | `GET` | `{root}` | 200 | |
//!
//! Every todo in a response is an [`EntityModel`] whose self link is
//! `{root}/{id}`; the list is a [`CollectionModel`] linked to `{root}`.

use std::future::Future;
use std::sync::Arc;

use tracing::error;

use crate::hal::{CollectionModel, EntityModel, Link};
use crate::id::{IdError, TodoId};
use crate::store::{StoreError, TodoStore};
use crate::todo::Todo;
use crate::{Handler, IntoResponse, Method, Request, Response, Router, Status};

pub const DEFAULT_ROOT: &str = "/api/v1/todos";

/// Key under `_embedded` holding the list.
const COLLECTION_RELATION: &str = "todoList";

/// Request-level failures, each answered with its own status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,

    #[error("invalid todo id `{raw}`: {source}")]
    MalformedId { raw: String, source: IdError },

    #[error("malformed request body: {0}")]
    MalformedBody(serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Response::status(Status::NotFound),
            Self::MalformedId { .. } | Self::MalformedBody(_) => {
                Response::builder().status(Status::BadRequest).text(self.to_string())
            }
            Self::Store(e) => {
                error!("store failure: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

/// Shared state of the todo handlers.
pub struct TodoApi {
    store: Arc<dyn TodoStore>,
    root: String,
}

impl TodoApi {
    /// `root` is the collection path, e.g. [`DEFAULT_ROOT`]: leading slash,
    /// no trailing slash.
    pub fn new(store: Arc<dyn TodoStore>, root: impl Into<String>) -> Self {
        Self { store, root: root.into() }
    }

    /// Registers the five todo routes on `router`.
    pub fn routes(self: Arc<Self>, router: Router) -> Router {
        let item = format!("{}/{{id}}", self.root);
        router
            .on(Method::Get,    &self.root, bind(Arc::clone(&self), list_todos))
            .on(Method::Post,   &self.root, bind(Arc::clone(&self), create_todo))
            .on(Method::Get,    &item,      bind(Arc::clone(&self), get_todo))
            .on(Method::Put,    &item,      bind(Arc::clone(&self), update_todo))
            .on(Method::Delete, &item,      bind(Arc::clone(&self), delete_todo))
    }

    pub fn item_link(&self, id: TodoId) -> Link {
        Link::new(format!("{}/{id}", self.root))
    }

    pub fn collection_link(&self) -> Link {
        Link::new(self.root.clone())
    }

    fn represent(&self, todo: Todo) -> Result<EntityModel<Todo>, ApiError> {
        let id = todo.id.ok_or(StoreError::MissingId)?;
        Ok(EntityModel::new(todo, self.item_link(id)))
    }
}

/// Adapts `f(api, req)` into a router handler that owns `api`.
fn bind<F, Fut, R>(api: Arc<TodoApi>, f: F) -> impl Handler
where
    F: Fn(Arc<TodoApi>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    move |req: Request| f(Arc::clone(&api), req)
}

fn path_id(req: &Request) -> Result<TodoId, ApiError> {
    let raw = req.param("id").unwrap_or_default();
    raw.parse().map_err(|source| ApiError::MalformedId { raw: raw.to_owned(), source })
}

fn body(req: &Request) -> Result<Todo, ApiError> {
    req.json().map_err(ApiError::MalformedBody)
}

// GET {root}/{id}
async fn get_todo(api: Arc<TodoApi>, req: Request) -> Result<Response, ApiError> {
    let id = path_id(&req)?;
    let todo = api.store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Response::builder().hal(&api.represent(todo)?))
}

// POST {root}
async fn create_todo(api: Arc<TodoApi>, req: Request) -> Result<Response, ApiError> {
    let to_save = body(&req)?;
    let saved = api.store.save(Todo { id: None, ..to_save }).await?;
    let model = api.represent(saved)?;
    Ok(Response::builder()
        .status(Status::Created)
        .header("location", &model.links.self_link.href)
        .hal(&model))
}

// PUT {root}/{id}
//
// Lookup and save are two store calls. A delete landing in between is
// undone by the save, which re-creates `id`.
async fn update_todo(api: Arc<TodoApi>, req: Request) -> Result<Response, ApiError> {
    let id = path_id(&req)?;
    let to_modify = body(&req)?;
    if api.store.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }
    let saved = api.store.save(to_modify.with_id(id)).await?;
    Ok(Response::builder().hal(&api.represent(saved)?))
}

// DELETE {root}/{id}
async fn delete_todo(api: Arc<TodoApi>, req: Request) -> Result<Status, ApiError> {
    let id = path_id(&req)?;
    api.store.delete_by_id(id).await?;
    Ok(Status::NoContent)
}

// GET {root}
async fn list_todos(api: Arc<TodoApi>, _req: Request) -> Result<Response, ApiError> {
    let items = api.store.find_all().await?
        .into_iter()
        .map(|todo| api.represent(todo))
        .collect::<Result<Vec<_>, _>>()?;
    let model = CollectionModel::new(COLLECTION_RELATION, items, api.collection_link());
    Ok(Response::builder().hal(&model))
}
