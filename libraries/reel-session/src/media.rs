//! Media element and OS media-session seams

use crate::controller::PlaybackController;
use crate::error::{Result, SessionError};
use crate::types::Direction;
use reel_core::types::Item;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Raised when the host refuses to start playback without a user gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("playback start blocked pending a user gesture")]
pub struct AutoplayBlocked;

/// Driver for the host's media element
pub trait MediaElement: Send + Sync {
    /// Swap the element's source to `item` and begin loading
    fn load(&self, item: &Item);

    /// Attempt to start playback
    fn play(&self) -> std::result::Result<(), AutoplayBlocked>;

    /// Pause playback, keeping the source loaded
    fn pause(&self);

    /// Seek relative to the current position, in seconds (negative is back)
    fn seek_by(&self, seconds: f64);

    /// Seek to an absolute position
    fn seek_to(&self, position: Duration);

    /// Halt playback and release the source
    fn stop(&self);
}

/// OS media-session actions delivered to the bridge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaKey {
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Stop playback and unload the item
    Stop,
    /// Step to the next item in the active ordering
    Next,
    /// Step to the previous item in the active ordering
    Previous,
    /// Seek forwards by an offset
    SeekForward {
        /// Offset in seconds
        seconds: f64,
    },
    /// Seek backwards by an offset
    SeekBackward {
        /// Offset in seconds
        seconds: f64,
    },
    /// Seek to an absolute position
    SeekTo {
        /// Target position
        position: Duration,
    },
}

/// Thin input adapter mapping media-session actions onto controller
/// transitions and raw element seeks, one to one
///
/// Raw actions come in, named transitions go out; the core keeps no
/// input-device knowledge.
pub struct MediaSessionBridge {
    controller: Arc<PlaybackController>,
}

impl MediaSessionBridge {
    /// Create a bridge over the controller
    pub fn new(controller: Arc<PlaybackController>) -> Self {
        Self { controller }
    }

    /// Dispatch one media-session action
    ///
    /// A superseded navigation is not an error at this boundary; the newer
    /// request already owns the outcome.
    pub async fn handle(&self, key: MediaKey) -> Result<()> {
        let result = match key {
            MediaKey::Play => {
                self.controller.play();
                Ok(())
            }
            MediaKey::Pause => {
                self.controller.pause();
                Ok(())
            }
            MediaKey::Stop => {
                self.controller.stop();
                Ok(())
            }
            MediaKey::Next => self.controller.advance(Direction::Next).await,
            MediaKey::Previous => self.controller.advance(Direction::Previous).await,
            MediaKey::SeekForward { seconds } => {
                self.controller.seek_by(seconds);
                Ok(())
            }
            MediaKey::SeekBackward { seconds } => {
                self.controller.seek_by(-seconds);
                Ok(())
            }
            MediaKey::SeekTo { position } => {
                self.controller.seek_to(position);
                Ok(())
            }
        };

        match result {
            Err(SessionError::Superseded) => Ok(()),
            other => other,
        }
    }
}
