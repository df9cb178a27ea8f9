//! In-memory post repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostId, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

struct Inner {
    posts: BTreeMap<PostId, Post>,
    /// Highest id ever issued, including ids of deleted posts.
    high_water: PostId,
}

/// Posts kept in an ordered map behind an async RwLock.
///
/// Ids only ever grow, so map order is insertion order. Every mutation takes
/// the write lock, which serializes concurrent requests.
pub struct InMemoryPostRepository {
    inner: RwLock<Inner>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: BTreeMap::new(),
                high_water: 0,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        inner.posts.remove(&id).ok_or(RepoError::NotFound)?;
        tracing::debug!(post_id = id, remaining = inner.posts.len(), "Removed post");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.values().cloned().collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;

        let max_existing = inner.posts.last_key_value().map_or(0, |(id, _)| *id);
        let id = max_existing
            .max(inner.high_water)
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("post id space exhausted".to_string()))?;

        let post = Post::new(id, post);
        inner.posts.insert(id, post.clone());
        inner.high_water = id;

        tracing::debug!(post_id = id, "Stored post");
        Ok(post)
    }

    async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, RepoError> {
        let mut inner = self.inner.write().await;
        let post = inner.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(patch);
        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_id_is_one() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(NewPost::undated("A", "a")).await.unwrap();
        assert_eq!(post.id, 1);
    }

    #[tokio::test]
    async fn test_ids_follow_max_existing() {
        let repo = InMemoryPostRepository::new();
        for title in ["A", "B", "C"] {
            repo.insert(NewPost::undated(title, "body")).await.unwrap();
        }
        repo.delete(2).await.unwrap();

        let post = repo.insert(NewPost::undated("D", "body")).await.unwrap();
        assert_eq!(post.id, 4);
    }

    #[tokio::test]
    async fn test_deleted_newest_id_is_not_reused() {
        let repo = InMemoryPostRepository::new();
        repo.insert(NewPost::undated("A", "a")).await.unwrap();
        repo.insert(NewPost::undated("B", "b")).await.unwrap();
        repo.delete(2).await.unwrap();

        let post = repo.insert(NewPost::undated("C", "c")).await.unwrap();
        assert_eq!(post.id, 3);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        for title in ["zeta", "alpha", "mid"] {
            repo.insert(NewPost::undated(title, "body")).await.unwrap();
        }

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let repo = InMemoryPostRepository::new();

        assert!(matches!(
            repo.update(9, PostPatch::default()).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(repo.delete(9).await, Err(RepoError::NotFound)));
        assert!(repo.find_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_changes_stored_post() {
        let repo = InMemoryPostRepository::new();
        repo.insert(NewPost::undated("A", "a")).await.unwrap();

        let updated = repo
            .update(
                1,
                PostPatch {
                    author: Some("Grace".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.author, "Grace");
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(updated));
    }
}
