use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining the id-based operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Implementations assign ids on insert and must never hand out an id twice,
/// even after the post holding it was deleted.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// All posts in insertion order.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Store a new post under a freshly assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply `patch` to the stored post and return the result.
    async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, RepoError>;
}
