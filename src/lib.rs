//! # quill
//!
//! An in-memory blog post API on a minimal hyper-based HTTP layer.
//!
//! ## Layers
//!
//! - **HTTP** — radix-tree routing via [`matchit`], typed [`Method`] and
//!   [`Status`], type-erased async handlers, [`middleware`] (CORS, request
//!   tracing), and graceful shutdown on SIGTERM / Ctrl-C.
//! - **Posts** — [`posts::PostStore`] owns the posts in insertion order behind
//!   one lock; [`posts::routes`] exposes list, create, update, delete, and
//!   search under `/api/posts`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quill::middleware::{Cors, Trace};
//! use quill::posts::{self, PostStore};
//! use quill::{Config, Server, health};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quill::Error> {
//!     let config = Config::from_env()?;
//!     let app = posts::routes(Arc::new(PostStore::seeded()))
//!         .get("/healthz", health::liveness)
//!         .get("/readyz", health::readiness)
//!         .layer(Trace)
//!         .layer(Cors::permissive());
//!
//!     Server::bind(config.listen_addr()?).serve(app).await
//! }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod health;
pub mod middleware;
pub mod posts;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder, WithStatus};
pub use router::Router;
pub use server::{DEFAULT_MAX_BODY_BYTES, Server};
pub use status::Status;

/// The full application: post routes, health probes, tracing, and CORS.
pub fn app(store: std::sync::Arc<posts::PostStore>) -> Router {
    posts::routes(store)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .layer(middleware::Trace)
        .layer(middleware::Cors::permissive())
}
