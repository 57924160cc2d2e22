//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler; middleware wraps the whole dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), middleware: Vec::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use quill::{Method, Request, Response, Router};
    /// # async fn delete_post(_: Request) -> Response { Response::text("") }
    /// # async fn update_post(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Delete, "/api/posts/{id}", delete_post)
    ///     .on(Method::Put,    "/api/posts/{id}", update_post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Wraps every request in `middleware`.
    ///
    /// The first layer added is the outermost: it sees the request first and
    /// the response last.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Routes one fully-buffered request through the middleware stack and its
    /// handler.
    ///
    /// Every request passes through the middleware, including those that end
    /// in an empty `405` (method outside [`Method`]) or `404` (no route).
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let req = Request::new(parts, body, HashMap::new());
        Next::new(&self.middleware, self).run(req).await
    }

    /// Answers a request the server refused to read with an empty `status`
    /// response, still passing it through the middleware.
    pub(crate) async fn reject(&self, parts: http::request::Parts, status: Status) -> Response {
        let req = Request::new(parts, Bytes::new(), HashMap::new());
        Next::new(&self.middleware, self).rejecting(status).run(req).await
    }

    /// Innermost step of [`dispatch`](Router::dispatch): lookup and call.
    pub(crate) async fn route(&self, req: Request) -> Response {
        let Some(method) = req.method() else {
            return Response::status(Status::MethodNotAllowed);
        };
        match self.lookup(method, req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params)).await,
            None => Response::status(Status::NotFound),
        }
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
