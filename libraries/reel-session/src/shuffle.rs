//! Shuffled view derivation
//!
//! Produces a uniformly random permutation of a collection's items with an
//! optional pinned first item, using an in-place Fisher-Yates walk that
//! records final positions into the view's reverse index as it goes.

use crate::error::{Result, SessionError};
use crate::index::ReverseIndex;
use rand::Rng;
use reel_core::types::{Item, ItemId};

/// A randomized ordering over a collection's items with its own reverse index
///
/// The view and its index are always regenerated together; neither is ever
/// edited independently.
#[derive(Debug, Clone)]
pub struct ShuffledView {
    items: Vec<Item>,
    index: ReverseIndex,
}

impl ShuffledView {
    /// Items in shuffled order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Reverse index over the shuffled order
    pub fn index(&self) -> &ReverseIndex {
        &self.index
    }

    /// Number of items in the view
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the view is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Derive a shuffled view, optionally pinning `pin` to position 0
///
/// The pinned item is excluded from the random draw; every other item is
/// placed by drawing uniformly from the still-unshuffled range. Fails with
/// `NotFound` when a pin id is not present in the input.
pub(crate) fn derive(items: &[Item], pin: Option<&ItemId>) -> Result<ShuffledView> {
    let mut shuffled: Vec<Item> = items.to_vec();

    let pinned = match pin {
        Some(id) => {
            let at = shuffled
                .iter()
                .position(|item| &item.id == id)
                .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
            shuffled.swap(0, at);
            1
        }
        None => 0,
    };

    let mut index = ReverseIndex::with_capacity(shuffled.len());
    if pinned == 1 {
        index.record(shuffled[0].id.clone(), 0);
    }

    let mut rng = rand::thread_rng();
    let mut slot = shuffled.len();
    while slot > pinned {
        slot -= 1;
        let drawn = rng.gen_range(pinned..=slot);
        shuffled.swap(slot, drawn);
        index.record(shuffled[slot].id.clone(), slot);
    }

    Ok(ShuffledView {
        items: shuffled,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::types::CollectionId;
    use std::collections::HashSet;

    fn test_item(id: &str, position: u32) -> Item {
        Item::new(
            ItemId::new(id),
            CollectionId::new("7"),
            position,
            format!("Item {}", id),
            format!("/media/{}.webm", id),
        )
    }

    fn test_items(count: u32) -> Vec<Item> {
        (0..count)
            .map(|n| test_item(&format!("item{}", n), n))
            .collect()
    }

    #[test]
    fn shuffle_is_a_bijection_over_the_input_ids() {
        let items = test_items(20);
        let view = derive(&items, None).unwrap();

        assert_eq!(view.len(), items.len());

        let mut input_ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        let mut output_ids: Vec<&str> = view.items().iter().map(|item| item.id.as_str()).collect();
        input_ids.sort_unstable();
        output_ids.sort_unstable();
        assert_eq!(input_ids, output_ids);

        // No id appears twice
        let unique: HashSet<&str> = view.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(unique.len(), items.len());
    }

    #[test]
    fn index_matches_shuffled_positions() {
        let items = test_items(12);
        let view = derive(&items, None).unwrap();

        for (position, item) in view.items().iter().enumerate() {
            assert_eq!(view.index().position(&item.id), Some(position));
        }
        assert_eq!(view.index().len(), items.len());
    }

    #[test]
    fn pinned_item_occupies_position_zero() {
        let items = test_items(10);
        let pin = ItemId::new("item7");

        for _ in 0..50 {
            let view = derive(&items, Some(&pin)).unwrap();
            assert_eq!(view.items()[0].id, pin);
            assert_eq!(view.index().position(&pin), Some(0));
        }
    }

    #[test]
    fn unknown_pin_is_rejected() {
        let items = test_items(5);
        let result = derive(&items, Some(&ItemId::new("missing")));
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[test]
    fn single_item_shuffles_to_itself() {
        let items = test_items(1);
        let view = derive(&items, None).unwrap();
        assert_eq!(view.items()[0].id.as_str(), "item0");
        assert_eq!(view.index().position(&ItemId::new("item0")), Some(0));
    }

    #[test]
    fn empty_input_without_pin_is_an_empty_view() {
        let view = derive(&[], None).unwrap();
        assert!(view.is_empty());
        assert!(view.index().is_empty());
    }

    #[test]
    fn unpinned_slots_receive_each_item_with_roughly_equal_frequency() {
        // Distributional check only: the permutation is intentionally
        // non-deterministic, so we count slot occupancy over many trials.
        let items = test_items(4);
        let pin = ItemId::new("item0");
        let trials: u32 = 3000;

        let mut counts = vec![std::collections::HashMap::new(); items.len()];
        for _ in 0..trials {
            let view = derive(&items, Some(&pin)).unwrap();
            for (slot, item) in view.items().iter().enumerate() {
                *counts[slot].entry(item.id.clone()).or_insert(0u32) += 1;
            }
        }

        // The pin owns slot 0 outright
        assert_eq!(counts[0].get(&pin), Some(&trials));

        // Each unpinned item should land in each unpinned slot about
        // trials / 3 times; allow a generous band for randomness.
        let expected = trials / 3;
        let lower = expected / 2;
        let upper = expected * 2;
        for slot_counts in &counts[1..] {
            assert!(!slot_counts.contains_key(&pin));
            for (id, &count) in slot_counts {
                assert!(
                    count > lower && count < upper,
                    "slot frequency for {} out of band: {}",
                    id,
                    count
                );
            }
        }
    }
}
