//! MemoryBackend - in-process store for tests and local runs.
//!
//! Rows live in a `BTreeMap` keyed by id, so iteration order is insertion
//! order. A single `RwLock` makes each operation atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::backend::PostStore;
use super::error::{StorageError, StorageResult};
use super::post::{Post, PostInput, PostPatch};
use crate::constants::POST_ID_FIRST;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i32, Post>,
    /// `None` once `i32::MAX` has been handed out.
    next_id: Option<i32>,
}

impl Table {
    fn empty() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: Some(POST_ID_FIRST),
        }
    }

    fn insert(&mut self, input: &PostInput) -> StorageResult<Post> {
        let id = self
            .next_id
            .ok_or_else(|| StorageError::write("id sequence exhausted"))?;
        self.next_id = id.checked_add(1);

        let post = Post::from_input(id, input, Utc::now());
        self.rows.insert(id, post.clone());
        Ok(post)
    }
}

/// In-memory [`PostStore`].
#[derive(Debug)]
pub struct MemoryBackend {
    table: RwLock<Table>,
}

impl MemoryBackend {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::empty()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryBackend {
    async fn seed(&self, records: &[PostInput]) -> StorageResult<()> {
        let mut fresh = Table::empty();
        for record in records {
            fresh.insert(record)?;
        }

        // Postcondition
        assert_eq!(fresh.rows.len(), records.len(), "seed must insert every record");
        *self.table.write().await = fresh;
        debug!(count = records.len(), "seeded memory store");
        Ok(())
    }

    async fn list_all(&self) -> StorageResult<Vec<Post>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> StorageResult<Option<Post>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, input: &PostInput) -> StorageResult<Post> {
        let mut table = self.table.write().await;
        let post = table.insert(input)?;
        debug!(id = post.id, "created post");
        Ok(post)
    }

    async fn update(&self, id: i32, patch: &PostPatch) -> StorageResult<Option<Post>> {
        let mut table = self.table.write().await;
        let Some(post) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if patch.is_empty() {
            debug!(id, "empty patch, only refreshing updated_at");
        }
        post.apply(patch, Utc::now());
        debug!(id, "updated post");
        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: i32) -> StorageResult<bool> {
        let mut table = self.table.write().await;
        let removed = table.rows.remove(&id).is_some();
        debug!(id, removed, "delete post");
        Ok(removed)
    }
}
