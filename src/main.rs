//! quill server.
//!
//! Run with:
//!   RUST_LOG=quill=debug,info cargo run
//!
//! Try:
//!   curl 'http://localhost:5002/api/posts?sort=title&direction=desc'
//!   curl -X POST http://localhost:5002/api/posts \
//!        -H 'content-type: application/json' \
//!        -d '{"title":"Third post","content":"Hello"}'
//!   curl -X PUT http://localhost:5002/api/posts/3 \
//!        -H 'content-type: application/json' -d '{"content":"Edited"}'
//!   curl 'http://localhost:5002/api/posts/search?title=third'
//!   curl -X DELETE http://localhost:5002/api/posts/3

use std::sync::Arc;

use quill::posts::PostStore;
use quill::{Config, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), quill::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let store = Arc::new(PostStore::seeded());
    info!(posts = store.len(), "store seeded");

    Server::bind(config.listen_addr()?)
        .max_body_bytes(config.max_body_bytes)
        .serve(quill::app(store))
        .await
}
