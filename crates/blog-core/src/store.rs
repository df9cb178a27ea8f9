//! The post store - the single entry point handlers use for posts.

use std::sync::Arc;

use crate::domain::{FieldSearch, ListQuery, NewPost, Post, PostChanges, PostDraft, PostId};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, PostRepository, SystemClock};

/// Validates input, runs listings and maps repository failures to
/// domain errors. Cheap to clone; clones share the same repository.
#[derive(Clone)]
pub struct PostStore {
    repo: Arc<dyn PostRepository>,
    clock: Arc<dyn Clock>,
}

impl PostStore {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<dyn PostRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Insert already-validated posts, e.g. startup seed data.
    pub async fn seed(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        let mut stored = Vec::with_capacity(posts.len());
        for post in posts {
            stored.push(self.repo.insert(post).await.map_err(internal)?);
        }
        tracing::debug!(count = stored.len(), "Seeded posts");
        Ok(stored)
    }

    /// Posts matching `query`, in insertion order unless a sort was requested.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Post>, DomainError> {
        let posts = self.repo.list().await.map_err(internal)?;
        Ok(query.apply(posts))
    }

    /// Posts whose title or content match the given terms.
    pub async fn search_fields(&self, search: &FieldSearch) -> Result<Vec<Post>, DomainError> {
        if search.is_empty() {
            return Ok(Vec::new());
        }
        let posts = self.repo.list().await.map_err(internal)?;
        Ok(search.apply(posts))
    }

    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| not_found(id, e))?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let fields = draft.validate(self.clock.today())?;
        let post = self.repo.insert(fields).await.map_err(internal)?;
        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Apply the non-blank fields of `changes`. Input is validated before the
    /// id is looked up; a change set with nothing in it is a plain read.
    pub async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, DomainError> {
        let patch = changes.validate()?;
        if patch.is_empty() {
            return self.get(id).await;
        }
        let post = self
            .repo
            .update(id, patch)
            .await
            .map_err(|e| not_found(id, e))?;
        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| not_found(id, e))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn not_found(id: PostId, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => internal(other),
    }
}

fn internal(err: RepoError) -> DomainError {
    DomainError::Internal(err.to_string())
}
