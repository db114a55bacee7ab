//! Core types for session management

use reel_core::types::{SortDirection, SortKey};
use serde::{Deserialize, Serialize};

/// Active ordering for next/previous traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingMode {
    /// Walk the collection in its natural order
    Natural,

    /// Walk the derived shuffled view
    Shuffled,
}

impl OrderingMode {
    /// Stable name used in persisted preferences
    pub fn as_str(self) -> &'static str {
        match self {
            OrderingMode::Natural => "natural",
            OrderingMode::Shuffled => "shuffled",
        }
    }
}

/// Navigation direction for stepping through the active ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the ordered view
    Next,

    /// Towards the start of the ordered view
    Previous,
}

/// Scope named by unload operations and clear notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadScope {
    /// The currently loaded item only
    Item,

    /// The current collection and everything derived from it
    Collection,
}

/// Kind of list row a selection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// A collection row in the sidebar
    Collection,

    /// An item row in the current listing
    Item,
}

/// A single sort preference change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortUpdate {
    /// Change the key the listing is ordered by
    Key(SortKey),

    /// Change the listing direction
    Direction(SortDirection),
}

/// Metadata field a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Item titles
    Title,

    /// Uploader names
    Uploader,

    /// Long-form descriptions
    Description,

    /// Tag labels
    Tags,
}

impl SearchField {
    /// Stable name used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Uploader => "uploader",
            SearchField::Description => "description",
            SearchField::Tags => "tags",
        }
    }
}

/// Thumbnail encoding negotiated by the host's capability probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbFormat {
    /// WebP where the host supports it
    Webp,

    /// JPEG fallback
    Jpeg,
}

impl ThumbFormat {
    /// Stable name used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            ThumbFormat::Webp => "webp",
            ThumbFormat::Jpeg => "jpeg",
        }
    }
}

/// Names used with [`crate::ResourceLoader::persist_preference`]
pub mod prefs {
    /// Natural vs shuffled traversal
    pub const ORDERING: &str = "ordering";
    /// Listing sort key
    pub const SORT_KEY: &str = "sort_key";
    /// Listing sort direction
    pub const SORT_DIRECTION: &str = "sort_direction";
    /// Whether loading an item starts playback
    pub const AUTOPLAY: &str = "autoplay";
}

/// Configuration for a session at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial ordering mode (default: natural)
    pub ordering: OrderingMode,

    /// Initial sort key (default: playlist index)
    pub sort_key: SortKey,

    /// Initial sort direction (default: descending)
    pub sort_direction: SortDirection,

    /// Whether loading an item starts playback (default: true)
    pub autoplay: bool,

    /// Preferences persist through the loader only for authenticated sessions
    pub authenticated: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingMode::Natural,
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            autoplay: true,
            authenticated: false,
        }
    }
}
