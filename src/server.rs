//! HTTP server and graceful shutdown.
//!
//! On shutdown the server:
//! 1. Immediately stops `listener.accept()` — no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::router::Router;
use crate::status::Status;

/// Request bodies larger than this are refused with `413` unless
/// [`Server::max_body_bytes`] says otherwise.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    max_body_bytes: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called. Port `0` picks an ephemeral port.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr, max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }

    /// Largest request body read into memory; anything bigger gets `413`.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        run(listener, router, self.max_body_bytes, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops when `signal` resolves
    /// instead of on process signals. `on_bound` receives the actual local
    /// address once the listener is up.
    pub async fn serve_with_shutdown<F>(
        self,
        router: Router,
        on_bound: impl FnOnce(SocketAddr),
        signal: F,
    ) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.addr).await?;
        on_bound(listener.local_addr()?);
        run(listener, router, self.max_body_bytes, signal).await
    }
}

async fn run<F>(
    listener: TcpListener,
    router: Router,
    max_body_bytes: usize,
    shutdown: F,
) -> Result<(), Error>
where
    F: Future<Output = ()>,
{
    let router = Arc::new(router);
    info!(addr = %listener.local_addr()?, "quill listening");

    // Every spawned connection task, so shutdown can wait for them.
    let mut tasks = tokio::task::JoinSet::new();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Shutdown first: a signal stops accepting even if more are queued.
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

                tasks.spawn(async move {
                    // Called once per request on the connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        async move { dispatch(&router, req, max_body_bytes, remote_addr).await }
                    });

                    // HTTP/1.1 or HTTP/2, whatever the client negotiates.
                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(io, svc)
                        .await
                    {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished tasks so the set does not grow without bound.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}

    info!("quill stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Collects the body, routes one request, and produces one response.
///
/// Infallible: every failure becomes a status code so hyper never sees an
/// error. Refused bodies still pass through the router's middleware.
async fn dispatch<B>(
    router: &Router,
    req: http::Request<B>,
    max_body_bytes: usize,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    let response = match read_body(body, max_body_bytes).await {
        Ok(body) => router.dispatch(http::Request::from_parts(parts, body)).await,
        Err(status) => {
            debug!(peer = %remote_addr, ?status, "request body refused");
            router.reject(parts, status).await
        }
    };
    Ok(response.into_inner())
}

/// Buffers at most `limit` bytes: `413` past the limit, `400` if the body
/// cannot be read.
async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, Status>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(Status::ContentTooLarge),
        Err(_) => Err(Status::BadRequest),
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or Ctrl-C the process receives.
///
/// A handler that fails to install is logged and disabled rather than
/// taking the server down.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
