//! Render-collaborator contract
//!
//! The session core never touches presentation objects. It announces changes
//! through these notifications and reads layout state only through the
//! explicit queries below; redraws must be idempotent given the payloads.

use crate::types::{SelectionKind, UnloadScope};
use reel_core::types::{CollectionId, Item};

/// Notifications and layout queries implemented by the host UI
pub trait Renderer: Send + Sync {
    /// A collection finished loading; redraw the item listing
    fn collection_changed(&self, id: &CollectionId, items: &[Item]);

    /// A new item is authoritative; redraw the player and info panel
    fn item_changed(&self, item: &Item);

    /// Mark a list row selected, optionally scrolling it into view
    fn selection_changed(&self, kind: SelectionKind, id: &str, scroll_into_view: bool);

    /// The named scope was unloaded; show its empty-state placeholder
    fn cleared(&self, scope: UnloadScope);

    /// A fetch failed; show a transient message and keep the previous screen
    fn load_failed(&self, message: &str);

    /// Playback could not start on its own; show the manual play control,
    /// using `poster` as a placeholder when present
    fn show_manual_play(&self, poster: Option<&str>);

    /// Whether the description overflows its container, driving the "more"
    /// affordance
    fn is_description_overflowing(&self) -> bool {
        false
    }

    /// Layout constant for scroll positioning, queried once
    fn list_scroll_padding(&self) -> u32 {
        0
    }

    /// First collection row currently rendered, if any
    fn first_collection(&self) -> Option<CollectionId> {
        None
    }
}
