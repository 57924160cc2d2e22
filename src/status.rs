//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted — `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use quill::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("location", "/api/posts/3")
//!     .json(br#"{"id":3}"#.to_vec());
//!
//! // return Status directly from a handler
//! async fn gone(_req: quill::Request) -> Status {
//!     Status::NotFound
//! }
//! ```

/// The status codes the API and its middleware produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    Created,             // 201
    NoContent,           // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    ContentTooLarge,     // 413

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                   => http::StatusCode::OK,
            Status::Created              => http::StatusCode::CREATED,
            Status::NoContent            => http::StatusCode::NO_CONTENT,
            Status::BadRequest           => http::StatusCode::BAD_REQUEST,
            Status::NotFound             => http::StatusCode::NOT_FOUND,
            Status::MethodNotAllowed     => http::StatusCode::METHOD_NOT_ALLOWED,
            Status::ContentTooLarge      => http::StatusCode::PAYLOAD_TOO_LARGE,
            Status::InternalServerError  => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
