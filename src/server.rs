//! HTTP server and graceful shutdown.
//!
//! # Shutdown
//!
//! On **SIGTERM** or **SIGINT** (or when the future passed to
//! [`Server::serve_with_shutdown`] resolves) the server:
//! 1. Immediately stops `listener.accept()`; no new connections are made.
//! 2. Asks every open connection to shut down gracefully: requests already
//!    being handled finish and are answered, idle keep-alive connections are
//!    closed at once, and HTTP/2 clients receive a GOAWAY.
//! 3. Waits for those connections to close, then returns `Ok(())`.
//!
//! A failing `accept()` ends serving the same way, except that `serve`
//! returns [`ServeError::Accept`]. It is not retried.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::ServeError;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::routes::{Dispatcher, Routes};
use crate::status::Status;

enum Bind {
    Addr(String),
    Listener(TcpListener),
}

/// The HTTP server.
pub struct Server {
    bind: Bind,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called. Host names are resolved then (`"localhost:1217"` works).
    ///
    /// ```rust
    /// use warden::Server;
    /// let server = Server::bind("0.0.0.0:3000");
    /// # let _ = server;
    /// ```
    pub fn bind(addr: impl Into<String>) -> Self {
        Self { bind: Bind::Addr(addr.into()) }
    }

    /// Serves on an already bound listener, e.g. one bound to port `0`.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { bind: Bind::Listener(listener) }
    }

    /// The bound address, if the server was created from a listener.
    pub fn local_addr(&self) -> Result<Option<SocketAddr>, ServeError> {
        match &self.bind {
            Bind::Addr(_) => Ok(None),
            Bind::Listener(l) => l.local_addr().map(Some).map_err(ServeError::LocalAddr),
        }
    }

    /// Builds `routes` and serves them until SIGTERM / Ctrl-C, then drains.
    pub async fn serve(self, routes: Routes) -> Result<(), ServeError> {
        self.serve_with_shutdown(routes, shutdown_signal()).await
    }

    /// Builds `routes` and serves them until `signal` resolves, then drains.
    pub async fn serve_with_shutdown(
        self,
        routes: Routes,
        signal: impl Future<Output = ()>,
    ) -> Result<(), ServeError> {
        // Build before binding: a bad table never opens a socket.
        let table = Arc::new(routes.build()?);

        let listener = match self.bind {
            Bind::Listener(l) => l,
            Bind::Addr(addr) => {
                let bound = TcpListener::bind(addr.as_str()).await;
                bound.map_err(|source| ServeError::Bind { addr, source })?
            }
        };
        let addr = listener.local_addr().map_err(ServeError::LocalAddr)?;

        info!(%addr, routes = routes.len(), "warden listening");

        // HTTP/1.1 or HTTP/2, whichever the client speaks.
        let conn_builder = ConnBuilder::new(TokioExecutor::new());
        // Every open connection, so shutdown can close them.
        let graceful = GracefulShutdown::new();
        // Every connection task, so shutdown can wait for them.
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        let outcome = loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting at once,
                // even if more connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break Ok(());
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!(in_flight = tasks.len(), "accept error: {e}");
                            break Err(ServeError::Accept(e));
                        }
                    };

                    let table = Arc::clone(&table);
                    let io = TokioIo::new(stream);

                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let table = Arc::clone(&table);
                        async move { dispatch(&table, req, remote_addr).await }
                    });
                    let conn = graceful.watch(conn_builder.serve_connection(io, svc).into_owned());

                    tasks.spawn(async move {
                        if let Err(e) = conn.await {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set does not grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        };

        drop(listener);
        // Idle connections close now, busy ones after their current response.
        graceful.shutdown().await;
        while tasks.join_next().await.is_some() {}

        info!("warden stopped");
        outcome
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Infallible towards hyper: unmatched paths and unreadable bodies become
/// status codes. Any method reaches the endpoint; its filters decide.
async fn dispatch(
    table: &Dispatcher,
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<http_body_util::Full<bytes::Bytes>>, std::convert::Infallible> {
    let Some(handler) = table.lookup(req.uri().path()) else {
        return Ok(Response::status(Status::NotFound).into_inner());
    };
    // hyper only hands over valid tokens, so this rejects nothing in practice.
    let Ok(method) = req.method().as_str().parse::<Method>() else {
        return Ok(Response::status(Status::BadRequest).into_inner());
    };

    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes().to_vec(),
        Err(e) => {
            warn!(peer = %remote_addr, "failed to read request body: {e}");
            return Ok(Response::status(Status::BadRequest).into_inner());
        }
    };

    let request = Request::from_parts(parts, body, remote_addr.to_string(), method);
    Ok(handler.call(request).await.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C only on non-Unix).
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
