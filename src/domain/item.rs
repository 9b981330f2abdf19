//! Item Entity
//!
//! One content entry of the feed. Items are immutable value snapshots:
//! every aggregation pass rebuilds them wholesale from the remote store,
//! nothing mutates them in place.

use serde::{Deserialize, Serialize};

/// A single feed entry
///
/// `id` is stable across updates to the same logical item and serves as
/// the unique key for UI diffing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, non-empty
    pub id: String,
    /// Display title
    pub title: String,
    /// Body text
    pub description: String,
    /// Favorite flag; remote records may key this `isFavorite` or `favorite`
    #[serde(rename = "isFavorite", alias = "favorite", default)]
    pub is_favorite: bool,
}

impl Item {
    /// Create a new item; the favorite flag starts cleared
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            is_favorite: false,
        }
    }
}
