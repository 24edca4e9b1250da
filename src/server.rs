//! HTTP server and graceful shutdown.
//!
//! # Graceful shutdown and Kubernetes
//!
//! When Kubernetes terminates a pod it sends **SIGTERM** and waits
//! `terminationGracePeriodSeconds` (default 30 s) before sending SIGKILL.
//!
//! The server reacts by:
//! 1. Immediately stopping `listener.accept()`, so no new connections are made.
//! 2. Telling every open connection to finish its in-flight request and then
//!    close. Idle keep-alive connections close at once.
//! 3. Returning from [`Server::serve`], which lets `main` exit cleanly.
//!
//! Set `terminationGracePeriodSeconds` in your pod spec to a value longer
//! than your slowest request.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then accepts connections and dispatches them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        Self::serve_with_shutdown(listener, router, shutdown_signal()).await
    }

    /// Serves on an already-bound `listener` until `shutdown` resolves, then
    /// drains in-flight connections.
    pub async fn serve_with_shutdown(
        listener: TcpListener,
        router: Router,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        // Shared by every connection task without copying the route table.
        let router = Arc::new(router);

        info!(addr = %listener.local_addr()?, "todos listening");

        // HTTP/1.1 and HTTP/2, whatever the client negotiates.
        let builder = ConnBuilder::new(TokioExecutor::new());
        // Every served connection is registered here so shutdown can ask it
        // to close, including idle keep-alive connections.
        let graceful = GracefulShutdown::new();
        let mut tasks = tokio::task::JoinSet::new();

        // Futures must not move after their first poll. `tokio::pin!` pins
        // this one on the stack so the loop can poll it by reference.
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` polls arms top to bottom instead of at random.
                // Shutdown comes first so a signal stops accepting even while
                // connections are still queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    // Called once per request on the connection, not once
                    // per connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(router, req, remote_addr).await }
                    });

                    let conn = graceful.watch(builder.serve_connection(io, svc).into_owned());
                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Signal every connection to close once its current request is
        // answered, then wait for all of them.
        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("todos stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Buffers one request, routes it, and produces one response.
///
/// Every failure becomes a status code here, so hyper never sees an error.
async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();

    let Ok(method) = parts.method.as_str().parse::<Method>() else {
        debug!(method = %parts.method, path = %path, "unsupported method");
        return Ok(Response::status(Status::MethodNotAllowed).into_http());
    };

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            error!(peer = %remote_addr, "failed to read request body: {e}");
            return Ok(Response::status(Status::BadRequest).into_http());
        }
    };

    let response = router.handle(Request::new(method, path.as_str()).with_body(body)).await;

    debug!(
        %method,
        path = %path,
        status = response.status_code(),
        elapsed = ?started.elapsed(),
        "request"
    );

    Ok(response.into_http())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
