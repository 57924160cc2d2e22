use std::fmt;

use serde_json::json;

use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// Which required fields a create request left out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MissingFields {
    Title,
    Content,
    Both,
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Both => "Missing post title and content",
            Self::Title => "Missing post title",
            Self::Content => "Missing post content",
        })
    }
}

/// Client-facing failures of the post API.
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    MissingFields(MissingFields),

    #[error("Post not found")]
    NotFound,
}

impl PostError {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidParameter(_) | Self::MissingFields(_) => Status::BadRequest,
            Self::NotFound => Status::NotFound,
        }
    }
}

impl From<serde_json::Error> for PostError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidParameter(format!("Invalid JSON body: {e}"))
    }
}

/// `{"error": "<message>"}` with 400 or 404.
impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let status = self.status();
        Json(json!({ "error": self.to_string() })).with_status(status).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_error_object() {
        let res = PostError::MissingFields(MissingFields::Content).into_response();
        assert_eq!(res.status_code(), 400);
        assert_eq!(res.body(), br#"{"error":"Missing post content"}"#);

        let res = PostError::NotFound.into_response();
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.body(), br#"{"error":"Post not found"}"#);
    }

    #[test]
    fn malformed_json_is_an_invalid_parameter() {
        let err: PostError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, PostError::InvalidParameter(_)));
        assert_eq!(err.status(), Status::BadRequest);
    }
}
