//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. You register a path, you
//! get a handler.

use std::collections::HashMap;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application route table.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use todos::{Method, Request, Response, Router, Status};
    /// # async fn get_todo(_: Request) -> Response { Response::text("") }
    /// # async fn delete_todo(_: Request) -> Status { Status::NoContent }
    /// Router::new()
    ///     .on(Method::Get,    "/todos/{id}", get_todo)
    ///     .on(Method::Delete, "/todos/{id}", delete_todo);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Routes `req` and runs its handler.
    ///
    /// No route for the path at all → `404`. The path exists under a different
    /// method → `405`.
    pub async fn handle(&self, req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None if self.matches_other_method(req.method(), req.path()) => {
                Response::status(Status::MethodNotAllowed)
            }
            None => Response::status(Status::NotFound),
        }
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(&BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((matched.value, params))
    }

    fn matches_other_method(&self, method: Method, path: &str) -> bool {
        self.routes.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok())
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    async fn created(_req: Request) -> Status {
        Status::Created
    }

    fn router() -> Router {
        Router::new()
            .on(Method::Get, "/todos/{id}", echo_id)
            .on(Method::Post, "/todos", created)
    }

    #[tokio::test]
    async fn passes_path_params_to_handler() {
        let res = router().handle(Request::new(Method::Get, "/todos/abc")).await;

        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"abc");
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let res = router().handle(Request::new(Method::Get, "/nothing")).await;

        assert_eq!(res.status_code(), 404);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn known_path_with_other_method_is_405() {
        let res = router().handle(Request::new(Method::Delete, "/todos")).await;

        assert_eq!(res.status_code(), 405);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .on(Method::Post, "/todos", created)
            .on(Method::Post, "/todos", created);
    }
}
