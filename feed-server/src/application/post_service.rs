use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{error::DomainError, post::Post};
use tracing::instrument;

pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

impl<R: PostRepository + 'static> Clone for PostService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, text))]
    pub fn add_post(&self, author_id: String, text: String) -> Post {
        self.repo.add_post(author_id, text)
    }

    #[instrument(skip(self))]
    pub fn delete_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo.delete_post(id)
    }

    pub fn get_feed(&self) -> Vec<Post> {
        self.repo.feed()
    }

    pub fn post_count(&self) -> usize {
        self.repo.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::post_repository::InMemoryPostRepository;

    #[test]
    fn clones_share_one_store() {
        let service = PostService::new(Arc::new(InMemoryPostRepository::new()));
        let other = service.clone();

        service.add_post("alice".into(), "hi".into());
        let post = other.add_post("bob".into(), "hey".into());

        assert_eq!(post.id, 2);
        assert_eq!(service.post_count(), 2);
        assert_eq!(other.get_feed().len(), 2);
    }

    #[test]
    fn delete_through_service_reports_missing_post() {
        let service = PostService::new(Arc::new(InMemoryPostRepository::new()));
        assert!(matches!(
            service.delete_post(42),
            Err(DomainError::PostNotFound(42))
        ));
    }
}
