//! Native playback primitive abstraction
//!
//! The controller never decodes audio itself. It drives an object that can
//! load a URL, play, pause, seek and change volume (a browser `<audio>`
//! element, a desktop backend, a simulation) and listens to the asynchronous
//! events that object reports.

use crate::error::{PlayerError, Result};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

/// Asynchronous notifications from a media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position advanced or jumped (seconds)
    TimeUpdate(f64),

    /// Metadata loaded; carries the duration in seconds (may be NaN)
    MetadataReady(f64),

    /// End of media reached
    Ended,

    /// A previously accepted play command was refused later on
    PlaybackRejected(String),
}

/// Delivery end of a binding's event channel
///
/// Handed to the media element on subscribe. Once the binding is torn down
/// the receiving side is gone and `emit` returns `false`, so late events from
/// a previous source can never reach the controller.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<MediaEvent>,
}

impl EventSink {
    /// Create a sink and its receiving end
    pub fn channel() -> (Self, Receiver<MediaEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Deliver an event; returns whether anyone is still listening
    pub fn emit(&self, event: MediaEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Platform playback primitive
///
/// Commands are synchronous; results of playback arrive later through the
/// [`EventSink`] passed to `subscribe`.
pub trait MediaElement {
    /// Point the element at a new source and start loading it
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback
    ///
    /// `Err(PlaybackRejected)` when the host environment refuses (autoplay
    /// policy, no user gesture yet, ...).
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Move the playback position (seconds)
    fn set_position(&mut self, seconds: f64) -> Result<()>;

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Start delivering `timeupdate`, `metadata-ready` and `ended` events
    fn subscribe(&mut self, sink: EventSink);

    /// Stop delivering events; drops the sink
    fn unsubscribe(&mut self);
}

/// Command recorded by [`SimulatedMedia`]
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Load(String),
    Play,
    Pause,
    SetPosition(f64),
    SetVolume(f32),
}

/// Clock-driven media element
///
/// Plays nothing; advances a virtual position on `tick` and reports the same
/// events a browser audio element would. Every command is recorded so hosts
/// and tests can inspect what the controller asked for.
#[derive(Debug)]
pub struct SimulatedMedia {
    durations: HashMap<String, f64>,
    default_duration: f64,
    sink: Option<EventSink>,
    url: Option<String>,
    position: f64,
    duration: Option<f64>,
    playing: bool,
    volume: f32,
    reject_play: bool,
    auto_metadata: bool,
    commands: Vec<MediaCommand>,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
}

impl SimulatedMedia {
    /// Create a simulation where every source lasts `default_duration` seconds
    pub fn new(default_duration: f64) -> Self {
        Self {
            durations: HashMap::new(),
            default_duration,
            sink: None,
            url: None,
            position: 0.0,
            duration: None,
            playing: false,
            volume: 1.0,
            reject_play: false,
            auto_metadata: true,
            commands: Vec::new(),
            subscribe_calls: 0,
            unsubscribe_calls: 0,
        }
    }

    /// Register the duration of a specific URL
    pub fn with_duration(mut self, url: impl Into<String>, seconds: f64) -> Self {
        self.durations.insert(url.into(), seconds);
        self
    }

    /// Whether `load` reports metadata immediately (default: true)
    pub fn set_auto_metadata(&mut self, enabled: bool) {
        self.auto_metadata = enabled;
    }

    /// Make subsequent `play` commands fail like a blocked autoplay
    pub fn set_reject_play(&mut self, reject: bool) {
        self.reject_play = reject;
    }

    /// Report metadata for the loaded source
    pub fn deliver_metadata(&mut self) {
        let Some(url) = self.url.as_deref() else {
            return;
        };
        let duration = self
            .durations
            .get(url)
            .copied()
            .unwrap_or(self.default_duration);
        self.duration = Some(duration);
        self.emit(MediaEvent::MetadataReady(duration));
    }

    /// Report an event as if the element produced it
    pub fn emit(&self, event: MediaEvent) -> bool {
        match &self.sink {
            Some(sink) => sink.emit(event),
            None => false,
        }
    }

    /// Advance the virtual clock while playing
    pub fn tick(&mut self, seconds: f64) {
        if !self.playing {
            return;
        }
        let Some(duration) = self.duration else {
            return;
        };

        self.position += seconds.max(0.0);
        if self.position >= duration {
            self.position = duration;
            self.playing = false;
            self.emit(MediaEvent::TimeUpdate(duration));
            self.emit(MediaEvent::Ended);
        } else {
            self.emit(MediaEvent::TimeUpdate(self.position));
        }
    }

    /// Commands received so far
    pub fn commands(&self) -> &[MediaCommand] {
        &self.commands
    }

    /// Forget recorded commands
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether a sink is currently attached
    pub fn is_subscribed(&self) -> bool {
        self.sink.is_some()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls
    }
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self::new(180.0)
    }
}

impl MediaElement for SimulatedMedia {
    fn load(&mut self, url: &str) -> Result<()> {
        self.commands.push(MediaCommand::Load(url.to_string()));
        self.url = Some(url.to_string());
        self.position = 0.0;
        self.duration = None;
        self.playing = false;
        if self.auto_metadata {
            self.deliver_metadata();
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.push(MediaCommand::Play);
        if self.url.is_none() {
            return Err(PlayerError::Media("no source loaded".to_string()));
        }
        if self.reject_play {
            return Err(PlayerError::PlaybackRejected(
                "play() blocked by autoplay policy".to_string(),
            ));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.push(MediaCommand::Pause);
        self.playing = false;
        Ok(())
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.commands.push(MediaCommand::SetPosition(seconds));
        let upper = self.duration.unwrap_or(f64::INFINITY);
        self.position = seconds.clamp(0.0, upper);
        self.emit(MediaEvent::TimeUpdate(self.position));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.commands.push(MediaCommand::SetVolume(volume));
        self.volume = volume;
        Ok(())
    }

    fn subscribe(&mut self, sink: EventSink) {
        trace!("simulated media subscribed");
        self.subscribe_calls += 1;
        self.sink = Some(sink);
    }

    fn unsubscribe(&mut self) {
        trace!("simulated media unsubscribed");
        self.unsubscribe_calls += 1;
        self.sink = None;
    }
}
