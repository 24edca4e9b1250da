//! Handler trait and type erasure.
//!
//! The router keeps handlers of different concrete types in one table, so
//! each one is boxed behind [`ErasedHandler`]:
//!
//! ```text
//! async fn get_todo(req: Request) -> Result<Response, ApiError>
//!        ↓ router.on(Method::Get, "/todos/{id}", get_todo)
//! get_todo.into_boxed_handler()                  ← Handler blanket impl
//!        ↓
//! Box::new(FnHandler(get_todo))                  ← stored as BoxedHandler
//!        ↓
//! handler.call(req)                              ← one vtable dispatch
//!        ↓
//! Box::pin(async { get_todo(req).await.into_response() })
//! ```
//!
//! Handlers that need shared state (a store, a base URL) are closures that
//! capture an `Arc` and clone it into each call.

use std::future::Future;
use std::pin::Pin;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Pin<Box<…>>` because the runtime polls the future in place and it must
/// not move after the first poll. `Send + 'static` lets tokio move it across
/// worker threads.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler.
///
/// The router owns each handler once and lends `&self` per request, so a
/// `Box` is enough. Shared state lives in whatever the handler captures.
#[doc(hidden)]
pub type BoxedHandler = Box<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any `Fn(Request) -> impl Future<Output = impl IntoResponse>`,
/// which covers plain `async fn name(req: Request) -> …` items and closures
/// returning async blocks. Sealed: only the blanket impl below provides it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// `Sealed` is private, so other crates cannot name it and cannot implement
/// [`Handler`] on their own types.
mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Box::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
