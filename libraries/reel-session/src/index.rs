//! Reverse id-to-position lookup for ordered sequences

use reel_core::types::{Item, ItemId};
use std::collections::HashMap;

/// id -> position lookup for one specific ordered sequence
///
/// An index is only ever built or regenerated together with the sequence it
/// describes; it is never patched in place, so a stale index cannot outlive
/// its sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    positions: HashMap<ItemId, usize>,
}

impl ReverseIndex {
    /// Build an index over an ordered sequence
    pub fn build(items: &[Item]) -> Self {
        let mut index = Self::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            index.record(item.id.clone(), position);
        }
        index
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, id: ItemId, position: usize) {
        self.positions.insert(id, position);
    }

    /// Position of `id` in the indexed sequence
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Whether `id` appears in the indexed sequence
    pub fn contains(&self, id: &ItemId) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of indexed ids
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
