//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it, or return anything
//! that implements [`IntoResponse`]: a [`Status`], a string, or [`Json`].

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http_body_util::Full;
use serde::Serialize;
use tracing::{error, warn};

use crate::status::Status;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use quill::{Response, Status};
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(Status::NoContent);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use quill::{Response, Status};
///
/// Response::builder()
///     .status(Status::Created)
///     .header("location", "/api/posts/3")
///     .json(br#"{"id":3}"#.to_vec());
/// ```
#[derive(Debug)]
pub struct Response {
    body: Vec<u8>,
    headers: Vec<(String, String)>,
    status: http::StatusCode,
}

impl Response {
    /// `200 OK` — `application/json`.
    pub fn json(body: Vec<u8>) -> Self {
        Self::builder().json(body)
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code.into() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status.as_u16() }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Returns the first value set.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets a header, replacing any value already present under that name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.to_owned()));
    }

    /// Converts into the `http` response hyper writes to the wire.
    ///
    /// Headers whose name or value is not valid on the wire are dropped with
    /// a warning instead of failing the whole response.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        let map = res.headers_mut();
        for (name, value) in self.headers {
            match (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str())) {
                (Ok(n), Ok(v)) => {
                    map.append(n, v);
                }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: http::StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish(JSON, body)
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(TEXT, body.into().into_bytes())
    }

    /// Terminate with no body (e.g. `Status::NoContent`).
    pub fn no_body(self) -> Response {
        Response { body: Vec::new(), headers: self.headers, status: self.status }
    }

    fn finish(self, content_type: &str, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

// ── Json ──────────────────────────────────────────────────────────────────────

/// A serde-serializable value sent as `200 OK` `application/json`.
///
/// ```rust
/// use quill::{IntoResponse, Json};
///
/// let res = Json(vec![1, 2, 3]).into_response();
/// assert_eq!(res.body(), b"[1,2,3]");
/// ```
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Sends the value with a status other than `200 OK`.
    pub fn with_status(self, code: Status) -> WithStatus<T> {
        WithStatus { status: code, value: self.0, headers: Vec::new() }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        self.with_status(Status::Ok).into_response()
    }
}

/// A [`Json`] value with an explicit status and extra headers.
pub struct WithStatus<T> {
    status: Status,
    value: T,
    headers: Vec<(String, String)>,
}

impl<T> WithStatus<T> {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }
}

impl<T: Serialize> IntoResponse for WithStatus<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.value) {
            Ok(bytes) => {
                let builder = self.headers.iter()
                    .fold(Response::builder().status(self.status), |b, (k, v)| b.header(k, v));
                builder.json(bytes)
            }
            Err(e) => {
                error!("failed to serialize response body: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_puts_content_type_first() {
        let res = Response::builder()
            .status(Status::Created)
            .header("location", "/api/posts/3")
            .json(b"{}".to_vec());
        assert_eq!(res.status_code(), 201);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        assert_eq!(res.header("location"), Some("/api/posts/3"));
    }

    #[test]
    fn set_header_replaces_existing_value() {
        let mut res = Response::text("ok");
        res.set_header("Content-Type", "text/html");
        assert_eq!(res.header("content-type"), Some("text/html"));
    }

    #[test]
    fn json_with_status() {
        let res = Json(serde_json::json!({"error": "nope"}))
            .with_status(Status::NotFound)
            .into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), br#"{"error":"nope"}"#);
    }

    #[test]
    fn invalid_headers_are_dropped_on_the_wire() {
        let mut res = Response::text("ok");
        res.set_header("bad header", "x");
        let inner = res.into_inner();
        assert_eq!(inner.status(), http::StatusCode::OK);
        assert!(inner.headers().get("content-type").is_some());
        assert_eq!(inner.headers().len(), 1);
    }
}
