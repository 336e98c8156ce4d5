use async_trait::async_trait;
use thiserror::Error;

use crate::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::settings::SiteSettings;

/// Failures surfaced by the content stores. Distinct from booking
/// validation errors: the consuming UI reports these as transient
/// notifications.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("a post with slug \"{0}\" already exists")]
    DuplicateSlug(String),
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Blog content store.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All posts, newest first by publication date.
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError>;
    async fn find_by_id(&self, id: i32) -> Result<BlogPost, StoreError>;
    async fn find_by_slug(&self, slug: &str) -> Result<BlogPost, StoreError>;
    /// Rejects a slug already held by another post.
    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, StoreError>;
    /// Rejects a slug change colliding with a different post.
    async fn update(&self, id: i32, changes: UpdateBlogPost) -> Result<BlogPost, StoreError>;
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

/// Site-settings store: a single record, readable and fully replaceable.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Returns the settings, creating the record with defaults on first
    /// read.
    async fn get(&self) -> Result<SiteSettings, StoreError>;
    async fn replace(&self, settings: SiteSettings) -> Result<SiteSettings, StoreError>;
}
