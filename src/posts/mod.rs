//! The blog post API.
//!
//! | Method | Path | Success | Errors |
//! |---|---|---|---|
//! | `GET` | `/api/posts?sort=&direction=` | 200, list | 400 |
//! | `POST` | `/api/posts` | 201, created post | 400 |
//! | `DELETE` | `/api/posts/{id}` | 200, message | 404 |
//! | `PUT` | `/api/posts/{id}` | 200, updated post | 404, 400 |
//! | `GET` | `/api/posts/search?title=&content=` | 200, list | — |
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quill::posts::{self, PostStore};
//!
//! let app = posts::routes(Arc::new(PostStore::seeded()));
//! ```

mod error;
mod handlers;
mod model;
mod query;
mod store;

pub use error::{MissingFields, PostError};
pub use model::{Draft, NewPost, Post, PostId, PostPatch};
pub use query::{Direction, ListQuery, SearchQuery, SortField};
pub use store::PostStore;

use std::future::{Ready, ready};
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;

/// Registers the post endpoints, each sharing `store`.
pub fn routes(store: Arc<PostStore>) -> Router {
    mount(Router::new(), store)
}

/// Adds the post endpoints to an existing router.
pub fn mount(router: Router, store: Arc<PostStore>) -> Router {
    router
        .get("/api/posts", with(&store, handlers::list))
        .post("/api/posts", with(&store, handlers::create))
        .get("/api/posts/search", with(&store, |s, r| Ok(handlers::search(s, r))))
        .delete("/api/posts/{id}", with(&store, handlers::delete))
        .put("/api/posts/{id}", with(&store, handlers::update))
}

/// Adapts a synchronous `(store, request)` handler into a routable closure
/// that owns its own handle to the store.
fn with<F>(
    store: &Arc<PostStore>,
    handler: F,
) -> impl Fn(Request) -> Ready<Response> + Send + Sync + use<F>
where
    F: Fn(&PostStore, &Request) -> Result<Response, PostError> + Copy + Send + Sync + 'static,
{
    let store = Arc::clone(store);
    move |req| ready(handler(&store, &req).into_response())
}
