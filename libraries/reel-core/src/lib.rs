//! Reel Player Core
//!
//! Domain types shared across the Reel Player client crates.
//!
//! This crate defines:
//! - **Identifiers**: [`ItemId`], [`CollectionId`] (opaque, backend-assigned)
//! - **Domain Types**: [`Item`], [`Collection`], [`CollectionSummary`]
//! - **Sort Criteria**: [`SortKey`], [`SortDirection`]
//!
//! # Example
//!
//! ```rust
//! use reel_core::types::{CollectionId, Item, ItemId};
//!
//! let item = Item::new(
//!     ItemId::new("42"),
//!     CollectionId::new("7"),
//!     0,
//!     "Opening Credits",
//!     "/media/opening-credits.webm",
//! );
//!
//! assert_eq!(item.id.as_str(), "42");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

// Re-export commonly used types
pub use types::{
    Collection, CollectionId, CollectionSummary, Item, ItemId, ParseSortError, SortDirection,
    SortKey,
};
