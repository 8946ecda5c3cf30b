//! Player Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - State changes (loading, paused, playing, ended)
//! - Source (re)binding
//! - Position updates and seeks
//! - Volume and mute changes
//! - Rejected playback commands

use crate::types::{PlayerState, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// A new source was bound to the media element
    TrackBound {
        /// Resolved audio URL
        url: String,
    },

    /// Position or duration changed
    PositionChanged {
        /// Current position in seconds
        current_time: f64,
        /// Track duration in seconds
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Track reached its end
    TrackEnded,

    /// The media element refused a play command
    PlaybackRejected {
        /// Reason reported by the media element
        reason: String,
    },
}

/// Events emitted by the playlist selection store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// The ordered id list was replaced
    IdsReplaced {
        /// New list length
        length: usize,
    },

    /// The active id changed
    ActiveChanged {
        /// New active id
        active_id: Option<TrackId>,
    },

    /// Store was cleared
    Reset,
}
