//! Storage - Post Store Trait and Implementations
//!
//! TigerStyle: Abstract storage, explicit construction, no global handle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PostStore Trait                         │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │  MemoryBackend  │           │ PostgresBackend │
//! │   (testing)     │           │  (production)   │
//! └─────────────────┘           └─────────────────┘
//! ```

mod backend;
mod error;
mod memory;
mod post;

#[cfg(feature = "postgres")]
mod postgres;

pub use backend::{PostStore, SharedPostStore};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryBackend;
pub use post::{Post, PostInput, PostPatch};

#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;
