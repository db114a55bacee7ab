//! Per-class request generations for stale-response discard
//!
//! Issuing a new request of a class supersedes the one in flight: the older
//! token stops matching, and its resumption must not touch the session. An
//! optional cancellation flag gives transports that can abort an early-out;
//! correctness never depends on the abort actually happening.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Request classes raced independently of each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestClass {
    Collection,
    Item,
    Search,
}

/// Token captured when a request is issued and compared on resumption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestToken {
    class: RequestClass,
    generation: u64,
}

impl RequestToken {
    pub(crate) fn class(self) -> RequestClass {
        self.class
    }
}

/// Latest issued generation per request class
#[derive(Debug, Default)]
pub(crate) struct RequestTokens {
    collection: u64,
    item: u64,
    search: u64,
}

impl RequestTokens {
    /// Issue a token for a new request, superseding any in flight
    pub(crate) fn issue(&mut self, class: RequestClass) -> RequestToken {
        let slot = match class {
            RequestClass::Collection => &mut self.collection,
            RequestClass::Item => &mut self.item,
            RequestClass::Search => &mut self.search,
        };
        *slot += 1;
        RequestToken {
            class,
            generation: *slot,
        }
    }

    /// Whether `token` still belongs to the latest request of its class
    pub(crate) fn is_current(&self, token: RequestToken) -> bool {
        let latest = match token.class {
            RequestClass::Collection => self.collection,
            RequestClass::Item => self.item,
            RequestClass::Search => self.search,
        };
        latest == token.generation
    }
}

/// Abort hint handed to transports that can cancel a request in flight
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a fresh, untripped flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the associated request as superseded
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether the associated request has been superseded
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_newer_request_supersedes_the_older_token() {
        let mut tokens = RequestTokens::default();

        let first = tokens.issue(RequestClass::Item);
        assert!(tokens.is_current(first));

        let second = tokens.issue(RequestClass::Item);
        assert!(!tokens.is_current(first));
        assert!(tokens.is_current(second));
    }

    #[test]
    fn classes_are_independent() {
        let mut tokens = RequestTokens::default();

        let item = tokens.issue(RequestClass::Item);
        let collection = tokens.issue(RequestClass::Collection);
        tokens.issue(RequestClass::Search);

        assert!(tokens.is_current(item));
        assert!(tokens.is_current(collection));
    }

    #[test]
    fn cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let observer = flag.clone();
        assert!(!observer.is_cancelled());

        flag.cancel();
        assert!(observer.is_cancelled());
    }
}
