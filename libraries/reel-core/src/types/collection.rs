//! Collections of playable items

use super::ids::{CollectionId, ItemId};
use super::item::Item;
use serde::{Deserialize, Serialize};

/// Sidebar listing row for a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Collection identifier
    pub id: CollectionId,

    /// Display name
    pub name: String,

    /// Number of items the backend reports for this collection
    #[serde(default)]
    pub item_count: u32,
}

/// An ordered set of items under one sort
///
/// The order is authoritative only until a re-sort or reload replaces the
/// whole sequence; items are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection identifier
    pub id: CollectionId,

    /// Items in natural order for the selected sort
    pub items: Vec<Item>,
}

impl Collection {
    /// Create a collection from an ordered item list
    pub fn new(id: CollectionId, items: Vec<Item>) -> Self {
        Self { id, items }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item with the given id is present
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }
}
