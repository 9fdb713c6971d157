//! Blogposts - HTTP JSON API for blog posts
//!
//! Six routes over a single-table Post Store:
//! seed, list, fetch-by-id, create, update, delete.
//!
//! The store is built once at startup and handed to the router through
//! [`AppState`]; handlers never reach a global connection.

pub mod errors;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use posts_core::{PostStore, SharedPostStore};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Default HTTP bind address
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:3000";

/// Application name
pub const APP_NAME: &str = "blogposts";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Application State
// =============================================================================

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// The Post Store backend.
    pub store: SharedPostStore,
}

impl AppState {
    /// Wrap a store for use by the router.
    pub fn new(store: impl PostStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Use an already shared store.
    pub fn from_shared(store: SharedPostStore) -> Self {
        Self { store }
    }
}
