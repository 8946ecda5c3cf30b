//! Error types for the player

use crate::types::TrackId;
use thiserror::Error;

/// Player errors
///
/// None of these are fatal. Hosts log them and carry on; the worst case is
/// that an action does nothing.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Operation needs a bound source but the controller is idle
    #[error("No active track")]
    NoActiveTrack,

    /// The media element refused to start playback (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// Track id could not be resolved by the catalog
    #[error("Track not found: {0}")]
    LookupMiss(TrackId),

    /// Seek target is not a finite number
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Any other media element command failure
    #[error("Media error: {0}")]
    Media(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlayerError {
    /// Whether a host should surface this error to the user
    ///
    /// Idle controls and unknown track ids mean "nothing moved", and
    /// rejected playback already arrives as a [`PlayerEvent`].
    ///
    /// [`PlayerEvent`]: crate::PlayerEvent
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::NoActiveTrack | Self::LookupMiss(_) | Self::PlaybackRejected(_)
        )
    }
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
