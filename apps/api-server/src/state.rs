//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::NewPost;
use blog_core::{DomainError, PostStore};
use blog_infra::InMemoryPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostStore,
}

impl AppState {
    /// Build the application state with an in-memory post store.
    pub async fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let posts = PostStore::new(Arc::new(InMemoryPostRepository::new()));

        if config.seed_posts {
            let seeded = posts.seed(sample_posts()).await?;
            tracing::info!(count = seeded.len(), "Loaded sample posts");
        } else {
            tracing::info!("Starting with an empty post store");
        }

        Ok(Self::from_store(posts))
    }

    pub fn from_store(posts: PostStore) -> Self {
        Self { posts }
    }
}

/// The posts a fresh server starts with.
pub fn sample_posts() -> Vec<NewPost> {
    vec![
        NewPost::undated("First post", "This is the first post."),
        NewPost::undated("Second post", "This is the second post."),
    ]
}
