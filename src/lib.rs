//! # todos
//!
//! A hypermedia REST service for todos, on a minimal HTTP stack meant to sit
//! behind a reverse proxy.
//!
//! ## The surface
//!
//! | Method | Path | Answer |
//! |---|---|---|
//! | `GET` | `/api/v1/todos` | HAL collection |
//! | `POST` | `/api/v1/todos` | `201` + `location` |
//! | `GET` | `/api/v1/todos/{id}` | HAL entity or `404` |
//! | `PUT` | `/api/v1/todos/{id}` | HAL entity or `404` |
//! | `DELETE` | `/api/v1/todos/{id}` | `204`, always |
//! | `GET` | `/healthz`, `/readyz` | probes |
//!
//! TLS, rate limiting, slow clients and body-size limits belong to the proxy.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use todos::{MemoryStore, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = todos::app(Arc::new(MemoryStore::new()), todos::DEFAULT_ROOT);
//!
//!     Server::bind("0.0.0.0:3000".parse().unwrap()).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod hal;
pub mod health;
pub mod id;
pub mod store;
pub mod todo;

use std::sync::Arc;

pub use api::{ApiError, DEFAULT_ROOT, TodoApi};
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use id::TodoId;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{FileStore, MemoryStore, StoreError, TodoStore};
pub use todo::Todo;

/// The full route table: the todo resource under `root` plus the health
/// probes.
pub fn app(store: Arc<dyn TodoStore>, root: &str) -> Router {
    let router = Router::new()
        .on(Method::Get, health::LIVENESS_PATH, health::liveness)
        .on(Method::Get, health::READINESS_PATH, health::readiness);
    Arc::new(TodoApi::new(store, root)).routes(router)
}
