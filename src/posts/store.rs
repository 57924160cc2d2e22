//! In-memory post store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::error::PostError;
use super::model::{Draft, Post, PostId, PostPatch};
use super::query::{Direction, ListQuery, SearchQuery};

/// Owns every post, in insertion order, behind a single lock.
///
/// Each operation locks once, makes one pass, and returns clones; nothing
/// awaits while the lock is held. Ids come from a high-water mark, so an id
/// is never handed out twice, even after the newest post is deleted.
#[derive(Debug, Default)]
pub struct PostStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    posts: HashMap<PostId, Post>,
    order: Vec<PostId>,
    next_id: PostId,
}

impl Default for Inner {
    fn default() -> Self {
        Self { posts: HashMap::new(), order: Vec::new(), next_id: 1 }
    }
}

impl Inner {
    fn snapshot(&self) -> Vec<Post> {
        self.order.iter().filter_map(|id| self.posts.get(id)).cloned().collect()
    }

    fn insert(&mut self, draft: Draft) -> Post {
        let id = self.next_id;
        self.next_id += 1;
        let post = Post { id, title: draft.title, content: draft.content };
        self.posts.insert(id, post.clone());
        self.order.push(id);
        post
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `drafts` in order, with ids starting at 1.
    pub fn with_posts(drafts: impl IntoIterator<Item = Draft>) -> Self {
        let mut inner = Inner::default();
        for draft in drafts {
            inner.insert(draft);
        }
        Self { inner: Mutex::new(inner) }
    }

    /// The two posts every fresh process starts with.
    pub fn seeded() -> Self {
        Self::with_posts([
            Draft { title: "First post".into(), content: "This is the first post.".into() },
            Draft { title: "Second post".into(), content: "This is the second post.".into() },
        ])
    }

    // Every mutation leaves `Inner` consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: PostId) -> bool {
        self.lock().posts.contains_key(&id)
    }

    pub fn get(&self, id: PostId) -> Option<Post> {
        self.lock().posts.get(&id).cloned()
    }

    /// All posts, ordered per `query`. The stored order is never touched.
    ///
    /// With a sort field the order is a stable sort on that field's
    /// case-sensitive value; without one, `Desc` simply reverses insertion
    /// order.
    pub fn list(&self, query: ListQuery) -> Vec<Post> {
        let mut posts = self.lock().snapshot();
        match (query.sort, query.direction) {
            (Some(field), Direction::Asc) => {
                posts.sort_by(|a, b| field.key(a).cmp(field.key(b)));
            }
            (Some(field), Direction::Desc) => {
                posts.sort_by(|a, b| field.key(b).cmp(field.key(a)));
            }
            (None, Direction::Desc) => posts.reverse(),
            (None, Direction::Asc) => {}
        }
        posts
    }

    /// Posts matching `query`, in insertion order. An empty query matches
    /// everything.
    pub fn search(&self, query: &SearchQuery) -> Vec<Post> {
        let posts = self.lock().snapshot();
        if query.is_empty() {
            return posts;
        }
        let needles = query.folded();
        posts.into_iter().filter(|p| needles.matches(p)).collect()
    }

    pub fn create(&self, draft: Draft) -> Post {
        let post = self.lock().insert(draft);
        debug!(id = post.id, "post created");
        post
    }

    pub fn delete(&self, id: PostId) -> Result<Post, PostError> {
        let mut inner = self.lock();
        let post = inner.posts.remove(&id).ok_or(PostError::NotFound)?;
        inner.order.retain(|&other| other != id);
        drop(inner);
        debug!(id, "post deleted");
        Ok(post)
    }

    /// Applies `patch` in place and returns the post as stored.
    pub fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, PostError> {
        let mut inner = self.lock();
        let post = inner.posts.get_mut(&id).ok_or(PostError::NotFound)?;
        patch.apply(post);
        let post = post.clone();
        drop(inner);
        debug!(id, "post updated");
        Ok(post)
    }
}
