//! Query-string parameters for listing and searching.
//!
//! An empty value (`?sort=`) is treated the same as an absent one, and a
//! repeated name only contributes its first value.

use std::str::FromStr;

use crate::request::Request;

use super::error::PostError;
use super::model::Post;

/// Field a listing can be ordered by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Title,
    Content,
}

impl SortField {
    pub(crate) fn key(self, post: &Post) -> &str {
        match self {
            Self::Title => &post.title,
            Self::Content => &post.content,
        }
    }
}

impl FromStr for SortField {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            _ => Err(PostError::InvalidParameter("Invalid sort".to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PostError::InvalidParameter("Invalid direction".to_owned())),
        }
    }
}

/// `GET /api/posts?sort=&direction=`
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ListQuery {
    pub sort: Option<SortField>,
    pub direction: Direction,
}

impl ListQuery {
    /// Parses `sort` then `direction`; the first invalid one is reported.
    pub fn from_request(req: &Request) -> Result<Self, PostError> {
        let sort = non_empty(req, "sort").map(|s| s.parse::<SortField>()).transpose()?;
        let direction = non_empty(req, "direction")
            .map(|d| d.parse::<Direction>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { sort, direction })
    }
}

/// `GET /api/posts/search?title=&content=`
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl SearchQuery {
    pub fn from_request(req: &Request) -> Self {
        Self {
            title: non_empty(req, "title"),
            content: non_empty(req, "content"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Lowercased needles, ready for [`SearchQuery::matches`].
    pub(crate) fn folded(&self) -> Self {
        Self {
            title: self.title.as_deref().map(str::to_lowercase),
            content: self.content.as_deref().map(str::to_lowercase),
        }
    }

    /// True when the title matches OR the content matches, case-insensitively.
    /// Expects needles already folded with [`SearchQuery::folded`].
    pub(crate) fn matches(&self, post: &Post) -> bool {
        let hit = |needle: &Option<String>, haystack: &str| {
            needle.as_deref().is_some_and(|n| haystack.to_lowercase().contains(n))
        };
        hit(&self.title, &post.title) || hit(&self.content, &post.content)
    }
}

fn non_empty(req: &Request, key: &str) -> Option<String> {
    req.query(key).filter(|v| !v.is_empty())
}
