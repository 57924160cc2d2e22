//! Request handlers for `/api/posts`.
//!
//! Each handler borrows the store for one synchronous call and turns the
//! outcome into a response; nothing is retried or recovered here.

use serde_json::json;

use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

use super::error::PostError;
use super::model::{NewPost, PostId, PostPatch};
use super::query::{ListQuery, SearchQuery};
use super::store::PostStore;

/// `GET /api/posts`
pub fn list(store: &PostStore, req: &Request) -> Result<Response, PostError> {
    let query = ListQuery::from_request(req)?;
    Ok(Json(store.list(query)).into_response())
}

/// `POST /api/posts` → `201` with the created post and its `location`.
pub fn create(store: &PostStore, req: &Request) -> Result<Response, PostError> {
    let draft = req.json::<NewPost>()?.validate()?;
    let post = store.create(draft);
    let location = format!("/api/posts/{}", post.id);
    Ok(Json(post)
        .with_status(Status::Created)
        .header("location", &location)
        .into_response())
}

/// `DELETE /api/posts/{id}`
pub fn delete(store: &PostStore, req: &Request) -> Result<Response, PostError> {
    let id = path_id(req)?;
    store.delete(id)?;
    let message = format!("Post with id {id} has been deleted successfully.");
    Ok(Json(json!({ "message": message })).into_response())
}

/// `PUT /api/posts/{id}` → the post as stored after the merge.
///
/// An unknown id is reported before the body is looked at.
pub fn update(store: &PostStore, req: &Request) -> Result<Response, PostError> {
    let id = path_id(req)?;
    if !store.contains(id) {
        return Err(PostError::NotFound);
    }
    let patch = req.json::<PostPatch>()?;
    Ok(Json(store.update(id, patch)?).into_response())
}

/// `GET /api/posts/search`
pub fn search(store: &PostStore, req: &Request) -> Response {
    Json(store.search(&SearchQuery::from_request(req))).into_response()
}

/// `{id}` only matches ASCII digits (no sign, no whitespace); anything else
/// is treated as an unknown post.
fn path_id(req: &Request) -> Result<PostId, PostError> {
    req.param("id")
        .filter(|raw| !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|raw| raw.parse().ok())
        .ok_or(PostError::NotFound)
}
