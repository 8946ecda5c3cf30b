//! Core types for the player

use serde::{Deserialize, Serialize};
use std::fmt;

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Catalog record for a playable track
///
/// Owned by the catalog and never mutated by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Author / artist name
    pub author: String,

    /// Artwork reference (optional)
    #[serde(default)]
    pub artwork_url: Option<String>,

    /// Audio source reference; absolute URL or a path inside the storage bucket
    pub audio_url: String,

    /// Known duration in seconds, if the catalog has one
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

/// Player state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerState {
    /// No source bound
    Idle,

    /// Source bound, metadata not yet available
    Loading,

    /// Metadata known, not playing
    ReadyPaused,

    /// Metadata known, playing
    ReadyPlaying,

    /// Reached end of media; position rewound to 0
    Ended,
}

impl PlayerState {
    /// Whether a source is bound
    pub fn has_source(self) -> bool {
        self != PlayerState::Idle
    }

    /// Short lowercase label for hosts
    pub fn label(self) -> &'static str {
        match self {
            PlayerState::Idle => "idle",
            PlayerState::Loading => "loading",
            PlayerState::ReadyPaused => "paused",
            PlayerState::ReadyPlaying => "playing",
            PlayerState::Ended => "ended",
        }
    }
}

/// What `toggle_mute` does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuteBehavior {
    /// Two-state toggle: 0 becomes 1, anything else becomes 0
    #[default]
    Toggle,

    /// Remember the level before muting and restore it
    RestorePrevious,
}

/// Transient playback state owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Whether the media element confirmed it is playing
    pub is_playing: bool,

    /// Volume in [0, 1]
    pub volume: f32,

    /// Current position in seconds
    pub current_time: f64,

    /// Track duration in seconds (0 until metadata is loaded)
    pub duration: f64,
}

/// Configuration for the player controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f32,

    /// Start playback once a newly bound track is ready (default: true)
    pub autoplay: bool,

    /// Mute toggle behavior (default: Toggle)
    pub mute_behavior: MuteBehavior,

    /// Seeks closer than this to the current position are ignored (seconds)
    pub seek_epsilon: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            autoplay: true,
            mute_behavior: MuteBehavior::Toggle,
            seek_epsilon: 0.001,
        }
    }
}

impl PlayerConfig {
    /// Check that values are in range
    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(crate::PlayerError::Config(format!(
                "initial_volume must be within 0.0-1.0, got {}",
                self.initial_volume
            )));
        }
        if !self.seek_epsilon.is_finite() || self.seek_epsilon < 0.0 {
            return Err(crate::PlayerError::Config(format!(
                "seek_epsilon must be a non-negative number, got {}",
                self.seek_epsilon
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.initial_volume, 1.0);
        assert!(config.autoplay);
        assert_eq!(config.mute_behavior, MuteBehavior::Toggle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_out_of_range_volume() {
        let config = PlayerConfig {
            initial_volume: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlayerConfig {
            initial_volume: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{ "mute_behavior": "restore_previous" }"#).unwrap();
        assert_eq!(config.mute_behavior, MuteBehavior::RestorePrevious);
        assert!(config.autoplay);
        assert_eq!(config.initial_volume, 1.0);
    }

    #[test]
    fn track_deserializes_without_optional_fields() {
        let track: Track = serde_json::from_str(
            r#"{ "id": "a", "title": "Song", "author": "Someone", "audio_url": "songs/a.mp3" }"#,
        )
        .unwrap();
        assert_eq!(track.id, TrackId::new("a"));
        assert!(track.artwork_url.is_none());
        assert!(track.duration_secs.is_none());
    }

    #[test]
    fn only_idle_has_no_source() {
        assert!(!PlayerState::Idle.has_source());
        assert!(PlayerState::Loading.has_source());
        assert!(PlayerState::Ended.has_source());
        assert_eq!(PlayerState::ReadyPlaying.label(), "playing");
    }
}
