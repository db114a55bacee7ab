//! Authoritative session state
//!
//! The session is constructed once at application start and owns the current
//! item, collection, and derived ordered views. All mutation flows through
//! the playback controller's transitions; fields are replaced wholesale and
//! are never left partially stale.

use crate::error::{Result, SessionError};
use crate::index::ReverseIndex;
use crate::shuffle::{self, ShuffledView};
use crate::types::{OrderingMode, SessionConfig, SortUpdate, UnloadScope};
use reel_core::types::{Collection, CollectionId, Item, ItemId, SortDirection, SortKey};

/// The active ordered sequence paired with its matching reverse index
///
/// The pair always comes from the same generation: natural items with the
/// natural index, or a shuffled view with the index built alongside it.
#[derive(Debug, Clone, Copy)]
pub struct OrderedView<'a> {
    /// Items in the active order
    pub items: &'a [Item],

    /// Reverse index over exactly that order
    pub index: &'a ReverseIndex,
}

/// The single authoritative playback/navigation state
#[derive(Debug)]
pub struct Session {
    item: Option<Item>,
    collection: Option<Collection>,
    /// Natural-order index; present exactly when `collection` is
    index: Option<ReverseIndex>,
    shuffled: Option<ShuffledView>,
    ordering: OrderingMode,
    sort_key: SortKey,
    sort_direction: SortDirection,
    autoplay: bool,
}

impl Session {
    /// Create an empty session from configuration
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            item: None,
            collection: None,
            index: None,
            shuffled: None,
            ordering: config.ordering,
            sort_key: config.sort_key,
            sort_direction: config.sort_direction,
            autoplay: config.autoplay,
        }
    }

    // ===== Accessors =====

    /// Currently loaded item, if any
    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// Currently loaded collection, if any
    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    /// Id of the current collection, if any
    pub fn collection_id(&self) -> Option<&CollectionId> {
        self.collection.as_ref().map(|collection| &collection.id)
    }

    /// Active ordering mode
    pub fn ordering(&self) -> OrderingMode {
        self.ordering
    }

    /// Active sort key
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Active sort direction
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Whether loading an item starts playback
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Current shuffled view, if one has been derived
    pub fn shuffled(&self) -> Option<&ShuffledView> {
        self.shuffled.as_ref()
    }

    // ===== Mutation =====

    /// Replace the current collection wholesale
    ///
    /// Rebuilds the natural reverse index and drops any shuffled view derived
    /// from the previous collection. The current item is left untouched.
    /// Fails with `InvalidState` for an empty collection; callers unload the
    /// scope instead.
    pub fn set_collection(&mut self, collection: Collection) -> Result<()> {
        if collection.is_empty() {
            return Err(SessionError::InvalidState(
                "cannot load an empty collection; unload the scope instead",
            ));
        }

        self.index = Some(ReverseIndex::build(&collection.items));
        self.collection = Some(collection);
        self.shuffled = None;
        Ok(())
    }

    /// Replace the current item; the collection is not altered
    pub fn set_item(&mut self, item: Item) {
        self.item = Some(item);
    }

    /// Set the ordering mode
    ///
    /// Returning to natural order drops the derived view; it is regenerated
    /// fresh the next time shuffle turns on.
    pub fn set_ordering(&mut self, ordering: OrderingMode) {
        self.ordering = ordering;
        if ordering == OrderingMode::Natural {
            self.shuffled = None;
        }
    }

    /// Apply a sort preference change
    ///
    /// The listing itself only changes when the collection is reloaded.
    pub fn apply_sort(&mut self, update: SortUpdate) {
        match update {
            SortUpdate::Key(key) => self.sort_key = key,
            SortUpdate::Direction(direction) => self.sort_direction = direction,
        }
    }

    /// Set the autoplay preference
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Derive a fresh shuffled view over the current collection
    ///
    /// An explicit `pin` id is a caller contract and fails with `NotFound`
    /// when absent from the collection. Without one, the current item pins
    /// the draw when it appears in the collection; otherwise the whole view
    /// is shuffled unpinned. Always fully replaces any prior view.
    pub fn derive_shuffled_view(&mut self, pin: Option<&ItemId>) -> Result<()> {
        let collection = self
            .collection
            .as_ref()
            .ok_or(SessionError::InvalidState("no collection loaded"))?;

        let fallback = self
            .item
            .as_ref()
            .filter(|item| {
                self.index
                    .as_ref()
                    .is_some_and(|index| index.contains(&item.id))
            })
            .map(|item| &item.id);

        self.shuffled = Some(shuffle::derive(&collection.items, pin.or(fallback))?);
        Ok(())
    }

    /// Clear the named scope
    ///
    /// Unloading the collection also drops both derived views, and clears the
    /// item only when it belongs to that collection: an item playing from a
    /// different collection survives the browse.
    pub fn unload(&mut self, scope: UnloadScope) {
        match scope {
            UnloadScope::Item => {
                self.item = None;
            }
            UnloadScope::Collection => {
                let unloaded = self.collection.take().map(|collection| collection.id);
                self.index = None;
                self.shuffled = None;

                if let (Some(item), Some(id)) = (self.item.as_ref(), unloaded.as_ref()) {
                    if &item.collection_id == id {
                        self.item = None;
                    }
                }
            }
        }
    }

    /// Resolve the active (sequence, index) pair per the ordering mode
    ///
    /// Fails with `InvalidState` when the mode's view is not available: no
    /// collection in natural mode, or no derived view in shuffled mode.
    pub fn resolve_ordered_view(&self) -> Result<OrderedView<'_>> {
        match self.ordering {
            OrderingMode::Shuffled => {
                let view = self
                    .shuffled
                    .as_ref()
                    .ok_or(SessionError::InvalidState("no shuffled view derived"))?;
                Ok(OrderedView {
                    items: view.items(),
                    index: view.index(),
                })
            }
            OrderingMode::Natural => {
                let collection = self
                    .collection
                    .as_ref()
                    .ok_or(SessionError::InvalidState("no collection loaded"))?;
                let index = self
                    .index
                    .as_ref()
                    .ok_or(SessionError::InvalidState("no collection index built"))?;
                Ok(OrderedView {
                    items: &collection.items,
                    index,
                })
            }
        }
    }
}
