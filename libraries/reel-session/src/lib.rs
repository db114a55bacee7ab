//! Reel Player - Session & Navigation
//!
//! Client-side playback session state machine for Reel Player.
//!
//! This crate provides:
//! - The authoritative [`Session`]: current item, current collection, and
//!   the ordered views derived from them
//! - Shuffled view derivation with pinned-first support
//! - The [`PlaybackController`] transitions that orchestrate loads,
//!   navigation, shuffle, sorting, and unloads
//! - Browser-history mapping so host back/forward replays prior state
//! - Per-class request tokens that discard stale async results
//!
//! Rendering, media output, history storage, and network access are consumed
//! through traits; the core contains no presentation or transport knowledge.
//!
//! # Example
//!
//! ```ignore
//! use reel_session::{HistoryMode, PlaybackController, SessionConfig};
//! use reel_core::types::ItemId;
//! use std::sync::Arc;
//!
//! let controller = Arc::new(PlaybackController::new(
//!     SessionConfig::default(),
//!     loader,   // Arc<dyn ResourceLoader>, e.g. reel_client::HttpLoader
//!     renderer, // Arc<dyn Renderer>
//!     media,    // Arc<dyn MediaElement>
//!     history,  // Arc<dyn HistoryBackend>
//! ));
//!
//! // Deep link: the item resolves its own collection, restored in place
//! controller.open_item(&ItemId::new("42"), HistoryMode::Replace).await?;
//! ```

mod controller;
mod error;
mod history;
mod index;
mod loader;
mod media;
mod render;
mod request;
mod shuffle;
mod store;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{Result, SessionError};
pub use history::{EntryKind, HistoryAdapter, HistoryBackend, HistoryEntry, HistoryMode};
pub use index::ReverseIndex;
pub use loader::{LoadError, LoadResult, ResourceLoader};
pub use media::{AutoplayBlocked, MediaElement, MediaKey, MediaSessionBridge};
pub use render::Renderer;
pub use request::CancelFlag;
pub use shuffle::ShuffledView;
pub use store::{OrderedView, Session};
pub use types::{
    Direction, OrderingMode, SearchField, SelectionKind, SessionConfig, SortUpdate, ThumbFormat,
    UnloadScope,
};
