use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Storage seam for posts. Implementations never block on I/O, so the
/// methods are plain synchronous calls.
pub trait PostRepository: Send + Sync {
    fn add_post(&self, author_id: String, text: String) -> Post;
    fn delete_post(&self, id: i64) -> Result<Post, DomainError>;
    fn feed(&self) -> Vec<Post>;
    fn count(&self) -> usize;
}

struct PostStoreState {
    posts: Vec<Post>,
    next_id: i64,
}

/// Process-lifetime post store. A single lock guards both the posts and the
/// id counter, so ids follow lock acquisition order and are never reused.
pub struct InMemoryPostRepository {
    state: Mutex<PostStoreState>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PostStoreState {
                posts: Vec::new(),
                next_id: 1,
            }),
        }
    }

    // Every mutation is a single push or flag flip, so a poisoned guard still
    // holds consistent state.
    fn lock(&self) -> MutexGuard<'_, PostStoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PostRepository for InMemoryPostRepository {
    fn add_post(&self, author_id: String, text: String) -> Post {
        let mut state = self.lock();
        let post = Post::new(state.next_id, author_id, text);
        state.next_id += 1;
        state.posts.push(post.clone());

        info!(post_id = post.id, author_id = %post.author_id, "post created");
        post
    }

    fn delete_post(&self, id: i64) -> Result<Post, DomainError> {
        let mut state = self.lock();
        let post = state
            .posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(DomainError::PostNotFound(id))?;
        post.deleted = true;

        info!(post_id = id, "post deleted");
        Ok(post.clone())
    }

    fn feed(&self) -> Vec<Post> {
        let mut posts = self.lock().posts.clone();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        debug!(count = posts.len(), "feed snapshot");
        posts
    }

    fn count(&self) -> usize {
        self.lock().posts.len()
    }
}
