//! Post - the only entity in the store.
//!
//! TigerStyle: Explicit types. Text fields are optional because the table
//! does not enforce them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Post
// =============================================================================

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Surrogate key assigned by the store, immutable after creation
    pub id: i32,
    /// Post title
    pub title: Option<String>,
    /// Post body
    pub content: Option<String>,
    /// Author name
    pub author: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a freshly created post from client input.
    #[must_use]
    pub fn from_input(id: i32, input: &PostInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            author: input.author.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields present in `patch`, keep the rest.
    ///
    /// A field sent as `null` is cleared. `updated_at` is refreshed even when
    /// the patch is empty.
    pub fn apply(&mut self, patch: &PostPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        self.updated_at = now;
    }
}

// =============================================================================
// PostInput
// =============================================================================

/// Client-supplied fields for a new post. The id is always server-assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInput {
    /// Post title
    pub title: Option<String>,
    /// Post body
    pub content: Option<String>,
    /// Author name
    pub author: Option<String>,
}

impl PostInput {
    /// Input with all three fields set.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            author: Some(author.into()),
        }
    }
}

// =============================================================================
// PostPatch
// =============================================================================

/// Partial update.
///
/// Each field is `None` when the key is absent (keep the stored value),
/// `Some(None)` when it is sent as `null` (clear it), and `Some(Some(_))`
/// when it carries a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    /// New title
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    /// New body
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
    /// New author
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<Option<String>>,
}

/// Only runs when the key is present, so `null` becomes `Some(None)`.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl PostPatch {
    /// Empty patch; applying it only refreshes `updated_at`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    /// Set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(Some(author.into()));
        self
    }

    /// Clear the title.
    #[must_use]
    pub fn clear_title(mut self) -> Self {
        self.title = Some(None);
        self
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}
