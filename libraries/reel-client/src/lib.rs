//! Reel Player - Backend Client
//!
//! HTTP implementation of the session crate's resource loader against the
//! Reel Player backend JSON API, plus the sidebar collection listing the
//! session core does not consume itself.
//!
//! The session state machine stays transport-agnostic; this crate is the one
//! place that knows routes, envelopes, and encodings.

mod client;
mod error;
mod types;

pub use client::HttpLoader;
pub use error::{ClientError, Result};
