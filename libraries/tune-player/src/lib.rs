//! Tune - Player
//!
//! Platform-agnostic audio player core for the Tune web front end.
//!
//! This crate provides:
//! - Playlist selection store (ordered track ids + active id)
//! - Playback controller state machine (idle, loading, paused, playing, ended)
//! - Wraparound next/previous navigation
//! - Volume control with mute toggle
//! - Seek with range clamping
//! - `m:ss` time formatting and seek-bar math
//! - Browser `<audio>` binding (`wasm` feature)
//!
//! # Architecture
//!
//! `tune-player` never touches audio samples. It drives a native playback
//! primitive through the [`MediaElement`] trait and reacts to the events it
//! reports (`timeupdate`, `metadata-ready`, `ended`). Track metadata comes
//! from a [`TrackCatalog`]. Both are provided by the host.
//!
//! # Example: Session
//!
//! ```rust
//! use tune_player::{
//!     InMemoryCatalog, PlayerConfig, PlayerSession, PlayerState, SimulatedMedia, Track, TrackId,
//! };
//!
//! let mut catalog = InMemoryCatalog::new();
//! for id in ["a", "b", "c"] {
//!     catalog.insert(Track {
//!         id: TrackId::new(id),
//!         title: format!("Song {id}"),
//!         author: "Band".to_string(),
//!         artwork_url: None,
//!         audio_url: format!("{id}.mp3"),
//!         duration_secs: None,
//!     });
//! }
//!
//! let mut session = PlayerSession::new(catalog, SimulatedMedia::new(65.0), PlayerConfig::default());
//! let ids = session.catalog().ids();
//! session.select(TrackId::new("b"), ids).unwrap();
//!
//! // Metadata arrives asynchronously; autoplay starts the track
//! session.pump();
//! assert_eq!(session.controller().state(), PlayerState::ReadyPlaying);
//! assert_eq!(session.controller().formatted_duration(), "1:05");
//!
//! session.play_next().unwrap();
//! assert_eq!(session.controller().bound_url(), Some("c.mp3"));
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use tune_player::{EventSink, MediaElement, PlayerConfig, PlayerController, Result};
//!
//! // Implement MediaElement for your platform
//! struct MyAudioOutput {
//!     sink: Option<EventSink>,
//! }
//!
//! impl MediaElement for MyAudioOutput {
//!     fn load(&mut self, url: &str) -> Result<()> {
//!         // Start fetching, report MediaEvent::MetadataReady through the sink
//!         Ok(())
//!     }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn set_position(&mut self, seconds: f64) -> Result<()> { Ok(()) }
//!     fn set_volume(&mut self, volume: f32) -> Result<()> { Ok(()) }
//!     fn subscribe(&mut self, sink: EventSink) { self.sink = Some(sink); }
//!     fn unsubscribe(&mut self) { self.sink = None; }
//! }
//!
//! let mut player = PlayerController::new(MyAudioOutput { sink: None }, PlayerConfig::default());
//! player.bind_source("https://example.com/song.mp3").ok();
//!
//! // In the host event loop
//! player.pump_events();
//! ```

mod catalog;
mod controller;
mod error;
mod events;
mod media;
mod navigation;
mod session;
mod store;
pub mod time;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use catalog::{InMemoryCatalog, TrackCatalog};
pub use controller::PlayerController;
pub use error::{PlayerError, Result};
pub use events::{PlayerEvent, SelectionEvent};
pub use media::{EventSink, MediaCommand, MediaElement, MediaEvent, SimulatedMedia};
pub use navigation::{next_id, previous_id};
pub use session::PlayerSession;
pub use store::PlaylistSelection;
pub use time::{format_time, TIME_PLACEHOLDER};
pub use types::{MuteBehavior, PlaybackSnapshot, PlayerConfig, PlayerState, Track, TrackId};
