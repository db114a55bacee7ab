//! Browser-history integration
//!
//! Translates session transitions into reversible history entries and back,
//! so host back/forward navigation can replay prior state. Only
//! user-initiated forward navigation grows the history; restoration corrects
//! the current entry in place, and pop replay leaves history untouched.

use reel_core::types::{CollectionId, ItemId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// What a history entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A collection view
    Collection,

    /// A loaded item
    Item,
}

/// A serializable record of one navigable state
///
/// Wire shape matches the host's history state object, for example
/// `{"type": "item", "id": "42"}`, paired with a shareable path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Kind of state the entry restores
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Identifier of the collection or item
    pub id: String,
}

impl HistoryEntry {
    /// Entry restoring a collection view
    pub fn collection(id: &CollectionId) -> Self {
        Self {
            kind: EntryKind::Collection,
            id: id.as_str().to_string(),
        }
    }

    /// Entry restoring a loaded item
    pub fn item(id: &ItemId) -> Self {
        Self {
            kind: EntryKind::Item,
            id: id.as_str().to_string(),
        }
    }

    /// Shareable deep-link path for this entry
    pub fn path(&self) -> String {
        match self.kind {
            EntryKind::Collection => format!("/c/{}", self.id),
            EntryKind::Item => format!("/i/{}", self.id),
        }
    }

    /// Parse a deep-link path back into an entry
    pub fn from_path(path: &str) -> Option<Self> {
        let (kind, id) = path
            .strip_prefix("/c/")
            .map(|id| (EntryKind::Collection, id))
            .or_else(|| path.strip_prefix("/i/").map(|id| (EntryKind::Item, id)))?;

        if id.is_empty() {
            return None;
        }

        Some(Self {
            kind,
            id: id.to_string(),
        })
    }
}

/// How a transition is reflected in history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// User-initiated forward navigation grows the history
    Push,

    /// Restoration corrects the current entry without growing history
    Replace,

    /// Pop replay and dependent loads leave history untouched
    None,
}

/// Push/replace operations provided by the host (browser history, test double)
pub trait HistoryBackend: Send + Sync {
    /// Add a new entry after the current one
    fn push(&self, entry: &HistoryEntry, path: &str);

    /// Overwrite the current entry in place
    fn replace(&self, entry: &HistoryEntry, path: &str);
}

/// Maps controller transitions onto history operations
pub struct HistoryAdapter {
    backend: Arc<dyn HistoryBackend>,
}

impl HistoryAdapter {
    /// Create an adapter over a host backend
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self { backend }
    }

    /// Record exactly one navigable state according to `mode`
    pub fn record(&self, mode: HistoryMode, entry: &HistoryEntry) {
        let path = entry.path();
        match mode {
            HistoryMode::Push => self.backend.push(entry, &path),
            HistoryMode::Replace => self.backend.replace(entry, &path),
            HistoryMode::None => {
                debug!(path = %path, "history untouched for replayed transition");
            }
        }
    }
}
