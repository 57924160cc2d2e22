//! Post record and request bodies.

use serde::{Deserialize, Serialize};

use super::error::{MissingFields, PostError};

/// Server-assigned post identifier. Positive and never reused.
pub type PostId = u64;

/// A stored blog post.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
}

/// Body of `POST /api/posts`.
///
/// Both fields are optional at the serde level so a missing field can be
/// reported by name; [`NewPost::validate`] turns it into a [`Draft`].
#[derive(Debug, Default, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A post that passed validation and is waiting for an id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn validate(self) -> Result<Draft, PostError> {
        match (self.title, self.content) {
            (Some(title), Some(content)) => Ok(Draft { title, content }),
            (None, None) => Err(PostError::MissingFields(MissingFields::Both)),
            (None, Some(_)) => Err(PostError::MissingFields(MissingFields::Title)),
            (Some(_), None) => Err(PostError::MissingFields(MissingFields::Content)),
        }
    }
}

/// Body of `PUT /api/posts/{id}`. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl PostPatch {
    pub(crate) fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
    }
}
