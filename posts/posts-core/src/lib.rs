//! Posts Core - Post Store
//!
//! Single-table persistence for blog posts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Posts Core                     │
//! ├─────────────────────────────────────────────┤
//! │  PostStore trait        │ seed/list/find/   │
//! │                         │ create/update/del │
//! ├─────────────────────────────────────────────┤
//! │  MemoryBackend          │ tests, local dev  │
//! │  PostgresBackend        │ production (sqlx) │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use posts_core::{MemoryBackend, PostInput, PostStore, StorageResult};
//!
//! async fn first_post() -> StorageResult<()> {
//!     let store = MemoryBackend::new();
//!     let post = store
//!         .create(&PostInput::new("Hello", "First post", "Alice"))
//!         .await?;
//!     assert_eq!(post.id, 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod storage;

// Re-export common types
pub use constants::*;
pub use storage::{
    MemoryBackend, Post, PostInput, PostPatch, PostStore, SharedPostStore, StorageError,
    StorageResult,
};

#[cfg(feature = "postgres")]
pub use storage::PostgresBackend;
