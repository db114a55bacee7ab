//! Playable items and their display metadata

use super::ids::{CollectionId, ItemId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single playable unit
///
/// Identity and ordering rest solely on `id`, `collection_id` and `position`;
/// everything else is read-only display metadata as returned by the backend
/// (except where a field is the configured sort key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable identifier from the backend
    pub id: ItemId,

    /// Collection this item belongs to
    pub collection_id: CollectionId,

    /// Ordinal position within the collection's natural order
    pub position: u32,

    /// Position assigned by the original upstream playlist, if any
    #[serde(default)]
    pub playlist_index: Option<u32>,

    /// Display title
    pub title: String,

    /// URL the media element loads from
    pub media_url: String,

    /// MIME type of the media source
    #[serde(default)]
    pub media_format: Option<String>,

    /// Running time in seconds
    #[serde(default)]
    pub duration_secs: Option<f64>,

    /// Thumbnail URL, also used as a poster when autoplay is blocked
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Uploader display name
    #[serde(default)]
    pub uploader: Option<String>,

    /// Link to the uploader's page
    #[serde(default)]
    pub uploader_url: Option<String>,

    /// Date the item was originally uploaded
    #[serde(default)]
    pub upload_date: Option<NaiveDate>,

    /// Local file modification time, shown when the upload date is missing
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,

    /// View count at download time
    #[serde(default)]
    pub view_count: Option<u64>,

    /// Average rating on a 0-5 scale
    #[serde(default)]
    pub average_rating: Option<f32>,

    /// Long-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Category labels
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tag labels
    #[serde(default)]
    pub tags: Vec<String>,

    /// Vertical resolution in pixels
    #[serde(default)]
    pub height: Option<u32>,

    /// Frame rate
    #[serde(default)]
    pub fps: Option<f32>,

    /// Video codec name
    #[serde(default)]
    pub vcodec: Option<String>,
}

impl Item {
    /// Create an item with the required fields; metadata starts empty
    pub fn new(
        id: ItemId,
        collection_id: CollectionId,
        position: u32,
        title: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            collection_id,
            position,
            playlist_index: None,
            title: title.into(),
            media_url: media_url.into(),
            media_format: None,
            duration_secs: None,
            thumbnail: None,
            uploader: None,
            uploader_url: None,
            upload_date: None,
            modified_at: None,
            view_count: None,
            average_rating: None,
            description: None,
            categories: Vec::new(),
            tags: Vec::new(),
            height: None,
            fps: None,
            vcodec: None,
        }
    }
}
