//! Error types for session and navigation state

use crate::loader::LoadError;
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// An identifier was absent from the sequence it was looked up in
    #[error("id not found: {0}")]
    NotFound(String),

    /// An operation ran against a missing precondition
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// An external fetch rejected or errored; the session is unchanged
    #[error("load failed: {0}")]
    LoadFailed(#[from] LoadError),

    /// A stale async result was discarded in favour of a newer request
    #[error("superseded by a newer request")]
    Superseded,
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
