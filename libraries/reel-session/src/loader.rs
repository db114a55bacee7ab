//! Resource loader seam
//!
//! The session core consumes backend data through this trait and never
//! performs network access itself. Implementations fetch and decode; they
//! never touch session state.

use crate::request::CancelFlag;
use crate::types::{SearchField, ThumbFormat};
use async_trait::async_trait;
use reel_core::types::{CollectionId, Item, ItemId, SortDirection, SortKey};
use std::collections::HashMap;
use thiserror::Error;

/// Failure reported by a resource loader
#[derive(Debug, Error)]
#[error("{0}")]
pub struct LoadError(String);

impl LoadError {
    /// Create a load error with a display message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type for loader operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Backend data access consumed by the playback controller
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Ordered item list for a collection under the given sort
    async fn fetch_collection(
        &self,
        id: &CollectionId,
        sort_key: SortKey,
        sort_direction: SortDirection,
    ) -> LoadResult<Vec<Item>>;

    /// Full record for a single item
    async fn fetch_item(&self, id: &ItemId) -> LoadResult<Item>;

    /// Items matching `query` in `field`
    ///
    /// `cancel` trips when the request is superseded; transports that can
    /// abort should stop work early, though callers only rely on the
    /// stale-result discard.
    async fn fetch_search(
        &self,
        field: SearchField,
        query: &str,
        cancel: CancelFlag,
    ) -> LoadResult<Vec<Item>>;

    /// Thumbnail bytes for the requested ids in the negotiated format
    async fn fetch_thumbnails(
        &self,
        ids: &[ItemId],
        format: ThumbFormat,
    ) -> LoadResult<HashMap<ItemId, Vec<u8>>>;

    /// Persist a named preference for the authenticated user
    async fn persist_preference(&self, name: &str, value: &str) -> LoadResult<()>;
}
