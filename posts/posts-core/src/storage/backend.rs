//! PostStore - the persistence seam used by the HTTP layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::StorageResult;
use super::post::{Post, PostInput, PostPatch};

/// Single-table persistence over posts.
///
/// Every method is one logical store call; there are no multi-call
/// transactions. "No matching row" is reported through `Option`/`bool`,
/// never through [`StorageError`](super::StorageError).
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Drop and recreate the table, then insert `records` in order.
    ///
    /// Ids restart at [`POST_ID_FIRST`](crate::POST_ID_FIRST).
    async fn seed(&self, records: &[PostInput]) -> StorageResult<()>;

    /// All posts in id order. An empty table yields an empty vector.
    async fn list_all(&self) -> StorageResult<Vec<Post>>;

    /// The post with `id`, if any.
    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Post>>;

    /// Insert a new post and return it with its assigned id.
    async fn create(&self, input: &PostInput) -> StorageResult<Post>;

    /// Merge `patch` onto the post with `id`.
    ///
    /// Returns `None` without creating anything when the id is unknown.
    async fn update(&self, id: i32, patch: &PostPatch) -> StorageResult<Option<Post>>;

    /// Remove the post with `id`. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i32) -> StorageResult<bool>;

    /// Release backend resources. Called once on shutdown.
    async fn close(&self) {}
}

/// Store handle shared across request handlers.
pub type SharedPostStore = Arc<dyn PostStore>;
