//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns. Each layer receives the request plus a [`Next`]
//! handle; it may answer on its own or call `next.run(req)` and adjust the
//! response on the way out.
//!
//! Built-in middleware:
//! - [`Cors`] — CORS headers for every origin, `OPTIONS` preflight answers
//! - [`Trace`] — per-request span with method, path, status, latency

mod cors;
mod trace;

pub use cors::Cors;
pub use trace::Trace;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// A boxed response future borrowing from the router for `'a`.
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = Response> + Send + 'a>>;

/// A layer wrapped around every request the [`Router`] dispatches.
pub trait Middleware: Send + Sync + 'static {
    fn call<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a>;
}

/// The remainder of the middleware stack, ending in the route handler.
pub struct Next<'a> {
    stack: &'a [Arc<dyn Middleware>],
    router: &'a Router,
    // Set when the request was refused before routing (e.g. body too large).
    reject: Option<Status>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(stack: &'a [Arc<dyn Middleware>], router: &'a Router) -> Self {
        Self { stack, router, reject: None }
    }

    pub(crate) fn rejecting(mut self, status: Status) -> Self {
        self.reject = Some(status);
        self
    }

    /// Passes `req` to the next layer, or to the handler once the stack is
    /// exhausted.
    pub fn run(self, req: Request) -> BoxFuture<'a> {
        match self.stack.split_first() {
            Some((layer, rest)) => layer.call(req, Next { stack: rest, ..self }),
            None => match self.reject {
                Some(status) => Box::pin(std::future::ready(Response::status(status))),
                None => Box::pin(self.router.route(req)),
            },
        }
    }
}
