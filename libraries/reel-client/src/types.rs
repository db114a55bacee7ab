//! Wire types for the backend JSON API.

use crate::error::{ClientError, Result};
use serde::Deserialize;

/// Response envelope all API routes share.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, surfacing envelope-level failures.
    pub(crate) fn into_result(self) -> Result<T> {
        if self.status == "ok" {
            self.data
                .ok_or_else(|| ClientError::Parse("missing data in ok response".into()))
        } else {
            Err(ClientError::Backend(
                self.message.unwrap_or_else(|| "unspecified error".into()),
            ))
        }
    }
}

/// Envelope for routes that acknowledge without returning data.
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub(crate) fn into_result(self) -> Result<()> {
        if self.status == "ok" {
            Ok(())
        } else {
            Err(ClientError::Backend(
                self.message.unwrap_or_else(|| "unspecified error".into()),
            ))
        }
    }
}
