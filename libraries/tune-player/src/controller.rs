//! Playback controller - the player state machine
//!
//! Mediates between the playlist selection, the user's controls and a
//! [`MediaElement`]. Owns the transient playback state.
//!
//! ```text
//!            bind_source(url)             metadata-ready
//!   Idle ────────────────────▶ Loading ────────────────▶ ReadyPaused
//!    ▲                           ▲                        │      ▲
//!    │ unbind                    │ bind_source(new url)   │ play │ pause
//!    │                           │ (from any state)       ▼      │
//!   any ─────────────────────────┘                      ReadyPlaying
//!                                                           │
//!                                                     ended │
//!                                                           ▼
//!                                                         Ended
//! ```
//!
//! `is_playing` only turns true once the media element accepted the play
//! command; a refusal (synchronous error or a later
//! [`MediaEvent::PlaybackRejected`]) leaves or puts it back to false.

use crate::{
    error::{PlayerError, Result},
    events::PlayerEvent,
    media::{EventSink, MediaElement, MediaEvent},
    navigation,
    store::PlaylistSelection,
    time,
    types::{PlaybackSnapshot, PlayerConfig, PlayerState, TrackId},
    volume::Volume,
};
use std::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Event subscription for one bound source
///
/// Exists exactly as long as the media element is subscribed on our behalf.
/// Dropping it drops the receiver, so sinks still held by the element stop
/// delivering.
struct Binding {
    url: String,
    events: Receiver<MediaEvent>,
}

/// Player state machine over a media element
pub struct PlayerController<M: MediaElement> {
    media: M,
    config: PlayerConfig,
    state: PlayerState,
    binding: Option<Binding>,

    // Transient playback state
    is_playing: bool,
    current_time: f64,
    duration: f64,
    volume: Volume,

    // Start playback once the bound source reports metadata
    autoplay_pending: bool,

    // Seek requested while loading, applied once the duration is known
    pending_seek: Option<f64>,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<M: MediaElement> PlayerController<M> {
    /// Create an idle controller around a media element
    pub fn new(media: M, config: PlayerConfig) -> Self {
        let volume = Volume::new(config.initial_volume, config.mute_behavior);
        let mut controller = Self {
            media,
            config,
            state: PlayerState::Idle,
            binding: None,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
            autoplay_pending: false,
            pending_seek: None,
            pending_events: Vec::new(),
        };
        controller.push_volume_to_media();
        controller
    }

    // ===== Source binding =====

    /// Bind a new source URL
    ///
    /// Tears down the previous subscription, resets transient state, subscribes
    /// a fresh event sink, loads the URL and enters `Loading`. Binding the URL
    /// that is already bound does nothing; an empty URL unbinds.
    pub fn bind_source(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            self.unbind();
            return Ok(());
        }
        if self.bound_url() == Some(url) {
            return Ok(());
        }

        self.release_binding();
        self.reset_transient();

        let (sink, events) = EventSink::channel();
        self.media.subscribe(sink);
        self.binding = Some(Binding {
            url: url.to_string(),
            events,
        });
        self.autoplay_pending = self.config.autoplay;

        info!("Binding source {}", url);
        self.set_state(PlayerState::Loading);
        self.pending_events.push(PlayerEvent::TrackBound {
            url: url.to_string(),
        });
        self.emit_position();

        self.push_volume_to_media();
        self.media.load(url).map_err(|e| {
            warn!("Failed to load {}: {}", url, e);
            e
        })
    }

    /// Drop the bound source and return to `Idle`
    pub fn unbind(&mut self) {
        if self.is_playing {
            if let Err(e) = self.media.pause() {
                warn!("Failed to pause while unbinding: {}", e);
            }
        }
        self.release_binding();
        self.reset_transient();
        self.autoplay_pending = false;
        if self.state != PlayerState::Idle {
            debug!("Controller unbound");
            self.set_state(PlayerState::Idle);
            self.emit_position();
        }
    }

    /// URL of the bound source
    pub fn bound_url(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.url.as_str())
    }

    // ===== Media events =====

    /// Apply all events the media element delivered since the last call
    ///
    /// Returns the number of events processed. Hosts call this from their
    /// event loop (every frame, after every tick, ...).
    pub fn pump_events(&mut self) -> usize {
        let events: Vec<MediaEvent> = match &self.binding {
            Some(binding) => binding.events.try_iter().collect(),
            None => return 0,
        };

        let count = events.len();
        for event in events {
            self.handle_media_event(event);
        }
        count
    }

    fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(seconds) => {
                if seconds.is_finite() {
                    self.current_time = seconds.max(0.0);
                    self.emit_position();
                }
            }
            MediaEvent::MetadataReady(duration) => self.on_metadata_ready(duration),
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::PlaybackRejected(reason) => {
                warn!("Playback rejected by media element: {}", reason);
                self.is_playing = false;
                if self.state == PlayerState::ReadyPlaying {
                    self.set_state(PlayerState::ReadyPaused);
                }
                self.pending_events
                    .push(PlayerEvent::PlaybackRejected { reason });
            }
        }
    }

    fn on_metadata_ready(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration >= 0.0 {
            duration
        } else {
            0.0
        };

        if self.state != PlayerState::Loading {
            // Duration refresh for an already loaded source
            self.emit_position();
            return;
        }

        debug!("Metadata ready, duration {:.2}s", self.duration);
        self.current_time = 0.0;
        if let Some(target) = self.pending_seek.take() {
            self.apply_deferred_seek(target);
        }
        self.set_state(if self.is_playing {
            PlayerState::ReadyPlaying
        } else {
            PlayerState::ReadyPaused
        });
        self.emit_position();

        if std::mem::take(&mut self.autoplay_pending) && !self.is_playing {
            // Failure is already logged and reported as an event
            let _ = self.start_playback();
        }
    }

    fn apply_deferred_seek(&mut self, target: f64) {
        let position = time::clamp_position(target, self.duration);
        if position <= self.config.seek_epsilon {
            return;
        }
        match self.media.set_position(position) {
            Ok(()) => self.current_time = position,
            Err(e) => warn!("Deferred seek to {:.2}s failed: {}", position, e),
        }
    }

    fn on_ended(&mut self) {
        debug!("Track ended");
        self.is_playing = false;
        self.current_time = 0.0;
        if let Err(e) = self.media.set_position(0.0) {
            warn!("Failed to rewind after end of track: {}", e);
        }
        self.pending_events.push(PlayerEvent::TrackEnded);
        self.set_state(PlayerState::Ended);
        self.emit_position();
    }

    // ===== Playback control =====

    /// Play if paused, pause if playing
    ///
    /// Does nothing and returns `Err(NoActiveTrack)` while idle.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.state == PlayerState::Idle {
            debug!("Ignoring play/pause: no active track");
            return Err(PlayerError::NoActiveTrack);
        }

        // The user decided; a pending autoplay must not override it
        self.autoplay_pending = false;

        if self.is_playing {
            self.pause_playback()
        } else {
            self.start_playback()
        }
    }

    fn start_playback(&mut self) -> Result<()> {
        match self.media.play() {
            Ok(()) => {
                self.is_playing = true;
                if matches!(self.state, PlayerState::ReadyPaused | PlayerState::Ended) {
                    self.set_state(PlayerState::ReadyPlaying);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Play command failed: {}", e);
                self.is_playing = false;
                let reason = match &e {
                    PlayerError::PlaybackRejected(reason) => reason.clone(),
                    other => other.to_string(),
                };
                self.pending_events
                    .push(PlayerEvent::PlaybackRejected { reason: reason.clone() });
                Err(PlayerError::PlaybackRejected(reason))
            }
        }
    }

    fn pause_playback(&mut self) -> Result<()> {
        self.media.pause().map_err(|e| {
            warn!("Pause command failed: {}", e);
            e
        })?;
        self.is_playing = false;
        if self.state == PlayerState::ReadyPlaying {
            self.set_state(PlayerState::ReadyPaused);
        }
        Ok(())
    }

    /// Seek to a position in seconds
    ///
    /// The target is clamped to the track's range. Seeking to the current
    /// position is a no-op: nothing is sent to the media element. While
    /// loading, the last target is held back until metadata arrives so the
    /// element and the displayed position never disagree.
    pub fn seek(&mut self, target: f64) -> Result<()> {
        if self.state == PlayerState::Idle {
            return Err(PlayerError::NoActiveTrack);
        }
        if !target.is_finite() {
            return Err(PlayerError::InvalidSeekPosition(target));
        }
        if self.state == PlayerState::Loading {
            debug!("Deferring seek to {:.2}s until metadata", target);
            self.pending_seek = Some(target);
            return Ok(());
        }

        let position = time::clamp_position(target, self.duration);
        if (position - self.current_time).abs() <= self.config.seek_epsilon {
            return Ok(());
        }

        self.media.set_position(position).map_err(|e| {
            warn!("Seek to {:.2}s failed: {}", position, e);
            e
        })?;
        self.current_time = position;
        if self.state == PlayerState::Ended {
            self.set_state(PlayerState::ReadyPaused);
        }
        self.emit_position();
        Ok(())
    }

    /// Seek by seek-bar fraction (0.0 - 1.0)
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        if self.state == PlayerState::Idle {
            return Err(PlayerError::NoActiveTrack);
        }
        self.seek(time::position_from_fraction(fraction, self.duration))
    }

    // ===== Navigation =====

    /// Activate the id after the active one, wrapping to the first
    ///
    /// Only writes the selection; playback follows once the host rebinds the
    /// new track's source. Returns the newly active id, `None` for an empty
    /// list.
    pub fn play_next(&self, selection: &mut PlaylistSelection) -> Option<TrackId> {
        let next = navigation::next_id(selection.ids(), selection.active_id())?.clone();
        debug!("Next track: {}", next);
        selection.set_active_id(next.clone());
        Some(next)
    }

    /// Activate the id before the active one, wrapping to the last
    pub fn play_previous(&self, selection: &mut PlaylistSelection) -> Option<TrackId> {
        let previous = navigation::previous_id(selection.ids(), selection.active_id())?.clone();
        debug!("Previous track: {}", previous);
        selection.set_active_id(previous.clone());
        Some(previous)
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0)
    pub fn set_volume(&mut self, level: f32) {
        if self.volume.set_level(level) {
            self.push_volume_to_media();
        }
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.push_volume_to_media();
    }

    fn push_volume_to_media(&mut self) {
        let level = self.volume.level();
        if let Err(e) = self.media.set_volume(level) {
            warn!("Failed to apply volume {:.2}: {}", level, e);
        }
        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: level,
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== State queries =====

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Copy of the transient playback state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: self.is_playing,
            volume: self.volume.level(),
            current_time: self.current_time,
            duration: self.duration,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Current position as `m:ss`
    pub fn formatted_current_time(&self) -> String {
        time::format_time(self.current_time)
    }

    /// Duration as `m:ss`
    pub fn formatted_duration(&self) -> String {
        time::format_time(self.duration)
    }

    /// Played share of the track (0-100)
    pub fn progress_percent(&self) -> f64 {
        time::progress_percent(self.current_time, self.duration)
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Direct access to the media element (hosts driving a simulation)
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn release_binding(&mut self) {
        if let Some(binding) = self.binding.take() {
            debug!("Releasing binding for {}", binding.url);
            self.media.unsubscribe();
        }
    }

    fn reset_transient(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
        self.pending_seek = None;
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlayerEvent::PositionChanged {
            current_time: self.current_time,
            duration: self.duration,
        });
    }
}

impl<M: MediaElement> Drop for PlayerController<M> {
    fn drop(&mut self) {
        self.release_binding();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaCommand, SimulatedMedia};
    use crate::types::MuteBehavior;

    fn controller() -> PlayerController<SimulatedMedia> {
        PlayerController::new(SimulatedMedia::new(120.0), PlayerConfig::default())
    }

    fn manual_controller() -> PlayerController<SimulatedMedia> {
        let config = PlayerConfig {
            autoplay: false,
            ..Default::default()
        };
        PlayerController::new(SimulatedMedia::new(120.0), config)
    }

    fn playing(url: &str) -> PlayerController<SimulatedMedia> {
        let mut player = controller();
        player.bind_source(url).unwrap();
        player.pump_events();
        assert_eq!(player.state(), PlayerState::ReadyPlaying);
        player
    }

    #[test]
    fn starts_idle_with_initial_volume() {
        let player = controller();
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.volume(), 1.0);
        assert_eq!(player.media().volume(), 1.0);
        assert!(player.bound_url().is_none());
    }

    #[test]
    fn toggle_while_idle_is_rejected_without_side_effects() {
        let mut player = controller();
        player.media_mut().clear_commands();

        assert!(matches!(
            player.toggle_play_pause(),
            Err(PlayerError::NoActiveTrack)
        ));
        assert!(!player.is_playing());
        assert!(player.media().commands().is_empty());
    }

    #[test]
    fn seek_while_idle_is_rejected() {
        let mut player = controller();
        assert!(matches!(player.seek(10.0), Err(PlayerError::NoActiveTrack)));
    }

    #[test]
    fn bind_enters_loading_until_metadata() {
        let mut player = controller();
        player.bind_source("a.mp3").unwrap();

        assert_eq!(player.state(), PlayerState::Loading);
        assert_eq!(player.bound_url(), Some("a.mp3"));
        assert_eq!(player.duration(), 0.0);

        player.pump_events();
        assert_eq!(player.duration(), 120.0);
        assert_eq!(player.state(), PlayerState::ReadyPlaying);
        assert!(player.is_playing());
    }

    #[test]
    fn without_autoplay_metadata_leads_to_paused() {
        let mut player = manual_controller();
        player.bind_source("a.mp3").unwrap();
        player.pump_events();

        assert_eq!(player.state(), PlayerState::ReadyPaused);
        assert!(!player.is_playing());

        player.toggle_play_pause().unwrap();
        assert_eq!(player.state(), PlayerState::ReadyPlaying);
        player.toggle_play_pause().unwrap();
        assert_eq!(player.state(), PlayerState::ReadyPaused);
        assert!(!player.media().is_playing());
    }

    #[test]
    fn empty_url_unbinds() {
        let mut player = playing("a.mp3");
        player.bind_source("   ").unwrap();
        assert_eq!(player.state(), PlayerState::Idle);
        assert!(!player.media().is_playing());
    }

    #[test]
    fn rebinding_same_url_is_noop() {
        let mut player = playing("a.mp3");
        player.media_mut().clear_commands();

        player.bind_source("a.mp3").unwrap();
        assert!(player.media().commands().is_empty());
        assert_eq!(player.state(), PlayerState::ReadyPlaying);
    }

    #[test]
    fn blocked_autoplay_leaves_player_paused() {
        let mut player = controller();
        player.media_mut().set_reject_play(true);
        player.bind_source("a.mp3").unwrap();
        player.pump_events();

        assert_eq!(player.state(), PlayerState::ReadyPaused);
        assert!(!player.is_playing());
        assert!(player
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlayerEvent::PlaybackRejected { .. })));
    }

    #[test]
    fn rejected_toggle_does_not_flip_flag() {
        let mut player = manual_controller();
        player.bind_source("a.mp3").unwrap();
        player.pump_events();
        player.media_mut().set_reject_play(true);

        assert!(matches!(
            player.toggle_play_pause(),
            Err(PlayerError::PlaybackRejected(_))
        ));
        assert!(!player.is_playing());
        assert_eq!(player.state(), PlayerState::ReadyPaused);
    }

    #[test]
    fn late_rejection_resyncs_flag() {
        let mut player = playing("a.mp3");
        player
            .media()
            .emit(MediaEvent::PlaybackRejected("NotAllowedError".to_string()));
        player.pump_events();

        assert!(!player.is_playing());
        assert_eq!(player.state(), PlayerState::ReadyPaused);
    }

    #[test]
    fn play_during_loading_cancels_autoplay_and_carries_over() {
        let mut player = manual_controller();
        player.media_mut().set_auto_metadata(false);
        player.bind_source("a.mp3").unwrap();

        player.toggle_play_pause().unwrap();
        assert!(player.is_playing());
        assert_eq!(player.state(), PlayerState::Loading);

        player.media_mut().deliver_metadata();
        player.pump_events();
        assert_eq!(player.state(), PlayerState::ReadyPlaying);
    }

    #[test]
    fn pause_during_loading_suppresses_autoplay() {
        let mut player = controller();
        player.media_mut().set_auto_metadata(false);
        player.bind_source("a.mp3").unwrap();

        // Not playing yet, so the toggle plays; toggle again to pause
        player.toggle_play_pause().unwrap();
        player.toggle_play_pause().unwrap();
        player.media_mut().deliver_metadata();
        player.pump_events();

        assert_eq!(player.state(), PlayerState::ReadyPaused);
        assert!(!player.is_playing());
    }

    #[test]
    fn time_updates_mirror_position() {
        let mut player = playing("a.mp3");
        player.media_mut().tick(30.0);
        player.pump_events();

        assert_eq!(player.current_time(), 30.0);
        assert_eq!(player.formatted_current_time(), "0:30");
        assert_eq!(player.formatted_duration(), "2:00");
        assert_eq!(player.progress_percent(), 25.0);
    }

    #[test]
    fn ended_rewinds_without_reload() {
        let mut player = playing("a.mp3");
        player.media_mut().clear_commands();
        player.media_mut().tick(500.0);
        player.pump_events();

        assert_eq!(player.state(), PlayerState::Ended);
        assert!(!player.is_playing());
        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.media().position(), 0.0);
        assert!(!player
            .media()
            .commands()
            .iter()
            .any(|c| matches!(c, MediaCommand::Load(_))));

        // Replay starts from the beginning
        player.toggle_play_pause().unwrap();
        assert_eq!(player.state(), PlayerState::ReadyPlaying);
    }

    #[test]
    fn seek_clamps_and_mirrors() {
        let mut player = playing("a.mp3");
        player.seek(500.0).unwrap();
        assert_eq!(player.current_time(), 120.0);
        assert_eq!(player.media().position(), 120.0);

        player.seek(-4.0).unwrap();
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn seek_to_current_position_sends_nothing() {
        let mut player = playing("a.mp3");
        player.seek(42.0).unwrap();
        player.media_mut().clear_commands();
        player.drain_events();

        player.seek(42.0).unwrap();
        assert!(player.media().commands().is_empty());
        assert!(!player.has_pending_events());
    }

    #[test]
    fn seek_rejects_nan() {
        let mut player = playing("a.mp3");
        assert!(matches!(
            player.seek(f64::NAN),
            Err(PlayerError::InvalidSeekPosition(_))
        ));
    }

    #[test]
    fn seek_after_end_moves_to_paused() {
        let mut player = playing("a.mp3");
        player.media_mut().tick(500.0);
        player.pump_events();

        player.seek(10.0).unwrap();
        assert_eq!(player.state(), PlayerState::ReadyPaused);
    }

    #[test]
    fn seek_while_loading_waits_for_metadata() {
        let mut player = manual_controller();
        player.media_mut().set_auto_metadata(false);
        player.bind_source("a.mp3").unwrap();
        player.media_mut().clear_commands();

        player.seek(50.0).unwrap();
        assert!(player.media().commands().is_empty());
        assert_eq!(player.current_time(), 0.0);

        player.media_mut().deliver_metadata();
        player.pump_events();

        assert_eq!(player.state(), PlayerState::ReadyPaused);
        assert_eq!(player.current_time(), 50.0);
        assert_eq!(player.media().position(), player.current_time());
        assert_eq!(player.formatted_current_time(), "0:50");
    }

    #[test]
    fn seek_while_loading_is_clamped_to_duration() {
        let mut player = manual_controller();
        player.media_mut().set_auto_metadata(false);
        player.bind_source("a.mp3").unwrap();

        player.seek(999.0).unwrap();
        player.media_mut().deliver_metadata();
        player.pump_events();

        assert_eq!(player.current_time(), 120.0);
        assert_eq!(player.media().position(), 120.0);
    }

    #[test]
    fn rebinding_discards_deferred_seek() {
        let mut player = manual_controller();
        player.media_mut().set_auto_metadata(false);
        player.bind_source("a.mp3").unwrap();
        player.seek(50.0).unwrap();

        player.bind_source("b.mp3").unwrap();
        player.media_mut().deliver_metadata();
        player.pump_events();

        assert_eq!(player.current_time(), 0.0);
        assert_eq!(player.media().position(), 0.0);
    }

    #[test]
    fn seek_to_fraction_uses_duration() {
        let mut player = playing("a.mp3");
        player.seek_to_fraction(0.5).unwrap();
        assert_eq!(player.current_time(), 60.0);
    }

    #[test]
    fn rebinding_resubscribes_exactly_once() {
        let mut player = playing("a.mp3");
        player.bind_source("b.mp3").unwrap();

        assert_eq!(player.media().subscribe_calls(), 2);
        assert_eq!(player.media().unsubscribe_calls(), 1);
        assert!(player.media().is_subscribed());

        player.unbind();
        assert_eq!(player.media().unsubscribe_calls(), 2);
        assert!(!player.media().is_subscribed());

        // Already idle, nothing left to release
        player.unbind();
        assert_eq!(player.media().unsubscribe_calls(), 2);
    }

    #[test]
    fn metadata_nan_duration_is_treated_as_unknown() {
        let mut player = controller();
        player.media_mut().set_auto_metadata(false);
        player.bind_source("live").unwrap();
        player.media().emit(MediaEvent::MetadataReady(f64::NAN));
        player.pump_events();

        assert_eq!(player.duration(), 0.0);
        assert_eq!(player.formatted_duration(), "0:00");
    }

    #[test]
    fn volume_changes_reach_media() {
        let mut player = controller();
        player.set_volume(0.25);
        assert_eq!(player.media().volume(), 0.25);

        player.toggle_mute();
        assert!(player.is_muted());
        assert_eq!(player.media().volume(), 0.0);

        player.toggle_mute();
        assert_eq!(player.media().volume(), 1.0);
    }

    #[test]
    fn restore_previous_mute_behavior() {
        let config = PlayerConfig {
            mute_behavior: MuteBehavior::RestorePrevious,
            ..Default::default()
        };
        let mut player = PlayerController::new(SimulatedMedia::default(), config);
        player.set_volume(0.4);
        player.toggle_mute();
        player.toggle_mute();
        assert_eq!(player.volume(), 0.4);
    }

    #[test]
    fn volume_survives_rebinding() {
        let mut player = playing("a.mp3");
        player.set_volume(0.3);
        player.bind_source("b.mp3").unwrap();
        assert_eq!(player.volume(), 0.3);
        assert_eq!(player.media().volume(), 0.3);
    }

    #[test]
    fn state_changes_are_reported_once() {
        let mut player = manual_controller();
        player.drain_events();
        player.bind_source("a.mp3").unwrap();
        player.pump_events();

        let states: Vec<PlayerState> = player
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                PlayerEvent::StateChanged { state } => Some(state),
                _ => None,
            })
            .collect();
        assert_eq!(states, vec![PlayerState::Loading, PlayerState::ReadyPaused]);
    }
}
