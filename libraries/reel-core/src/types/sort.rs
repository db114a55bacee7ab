//! Sort criteria for collection listings
//!
//! Changing either key or direction always reloads the collection wholesale;
//! the client never re-sorts a listing locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a persisted sort preference does not name a known value
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort value: {0}")]
pub struct ParseSortError(String);

/// Metadata key a collection listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Position assigned by the original upstream playlist
    #[default]
    PlaylistIndex,

    /// Ordinal discovered while scanning the library
    Position,

    /// Display title
    Title,

    /// Original upload date
    UploadDate,

    /// Running time
    Duration,
}

impl SortKey {
    /// Stable name used in query strings and persisted preferences
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PlaylistIndex => "playlist_index",
            SortKey::Position => "position",
            SortKey::Title => "title",
            SortKey::UploadDate => "upload_date",
            SortKey::Duration => "duration",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playlist_index" => Ok(SortKey::PlaylistIndex),
            "position" => Ok(SortKey::Position),
            "title" => Ok(SortKey::Title),
            "upload_date" => Ok(SortKey::UploadDate),
            "duration" => Ok(SortKey::Duration),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

/// Direction a collection listing is ordered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Lowest value first
    Ascending,

    /// Highest value first
    #[default]
    Descending,
}

impl SortDirection {
    /// Stable name used in query strings and persisted preferences
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}
