//! WASM-compatible player wrapper

use super::media::HtmlAudioMedia;
use super::types::WasmTrack;
use crate::{
    InMemoryCatalog, PlayerConfig, PlayerError, PlayerEvent, PlayerSession, Result,
    SelectionEvent, Track, TrackId,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

/// WASM-compatible player
///
/// Wraps a [`PlayerSession`] bound to an `<audio>` element with a
/// JavaScript-friendly API. Call `pump()` once per animation frame so events
/// reported by the element reach the player.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: PlayerSession<InMemoryCatalog, HtmlAudioMedia>,

    // Event callbacks
    on_state_change: Option<Function>,
    on_time_update: Option<Function>,
    on_volume_change: Option<Function>,
    on_track_change: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player over `element`
    ///
    /// `storage_base_url` resolves relative song paths; `config` is an
    /// optional `PlayerConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlAudioElement,
        storage_base_url: Option<String>,
        config: JsValue,
    ) -> std::result::Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?
        };
        config.validate().map_err(to_js)?;

        let catalog = match storage_base_url {
            Some(base) => InMemoryCatalog::with_storage_base(&base).map_err(to_js)?,
            None => InMemoryCatalog::new(),
        };

        Ok(Self {
            inner: PlayerSession::new(catalog, HtmlAudioMedia::new(element), config),
            on_state_change: None,
            on_time_update: None,
            on_volume_change: None,
            on_track_change: None,
            on_error: None,
        })
    }

    // ===== Catalog & Selection =====

    /// Add tracks (array of `WasmTrack` objects) to the catalog
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(&mut self, tracks: JsValue) -> std::result::Result<(), JsValue> {
        let tracks: Vec<WasmTrack> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;

        self.inner
            .catalog_mut()
            .extend(tracks.into_iter().map(Track::from));
        let result = self.inner.resync();
        self.settle(result);
        Ok(())
    }

    /// Play `id` out of the list `ids` (array of strings)
    pub fn select(&mut self, id: String, ids: JsValue) -> std::result::Result<(), JsValue> {
        let ids: Vec<String> = serde_wasm_bindgen::from_value(ids)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse ids: {}", e)))?;

        let result = self
            .inner
            .select(TrackId::new(id), ids.into_iter().map(TrackId::new).collect());
        self.settle(result);
        Ok(())
    }

    /// Play a single track, keeping the loaded list
    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&mut self, id: String) {
        let result = self.inner.play_track(TrackId::new(id));
        self.settle(result);
    }

    /// Clear selection and stop (logout)
    pub fn logout(&mut self) {
        self.inner.logout();
        self.dispatch_events();
    }

    // ===== Playback Control =====

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) {
        let result = self.inner.toggle_play_pause();
        self.settle(result);
    }

    /// Seek to position in seconds
    pub fn seek(&mut self, position_secs: f64) {
        let result = self.inner.seek(position_secs);
        self.settle(result);
    }

    /// Seek by seek-bar fraction (0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let result = self.inner.controller_mut().seek_to_fraction(fraction);
        self.settle(result);
    }

    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&mut self) {
        let result = self.inner.play_next();
        self.settle(result);
    }

    #[wasm_bindgen(js_name = playPrevious)]
    pub fn play_previous(&mut self) {
        let result = self.inner.play_previous();
        self.settle(result);
    }

    // ===== Volume Control =====

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, level: f32) {
        self.inner.set_volume(level);
        self.dispatch_events();
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.dispatch_events();
    }

    // ===== Event pump =====

    /// Apply events reported by the audio element; returns how many
    pub fn pump(&mut self) -> usize {
        let count = self.inner.pump();
        self.dispatch_events();
        count
    }

    // ===== State Queries =====

    /// Current state ("idle" | "loading" | "paused" | "playing" | "ended")
    pub fn state(&self) -> String {
        self.inner.controller().state().label().to_string()
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.controller().is_playing()
    }

    #[wasm_bindgen(js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.inner.controller().current_time()
    }

    pub fn duration(&self) -> f64 {
        self.inner.controller().duration()
    }

    pub fn volume(&self) -> f32 {
        self.inner.controller().volume()
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.inner.controller().is_muted()
    }

    #[wasm_bindgen(js_name = formattedCurrentTime)]
    pub fn formatted_current_time(&self) -> String {
        self.inner.controller().formatted_current_time()
    }

    #[wasm_bindgen(js_name = formattedDuration)]
    pub fn formatted_duration(&self) -> String {
        self.inner.controller().formatted_duration()
    }

    /// Seek-bar progress (0-100)
    #[wasm_bindgen(js_name = progressPercent)]
    pub fn progress_percent(&self) -> f64 {
        self.inner.controller().progress_percent()
    }

    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.inner.selection().active_id().map(|id| id.to_string())
    }

    /// Bound track as a `WasmTrack` object, or null
    #[wasm_bindgen(js_name = currentTrack)]
    pub fn current_track(&self) -> JsValue {
        self.inner
            .current_track()
            .map(WasmTrack::from)
            .and_then(|track| serde_wasm_bindgen::to_value(&track).ok())
            .unwrap_or(JsValue::NULL)
    }

    // ===== Event Listeners =====

    /// Register state change callback, called with the state label
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: Function) {
        self.on_state_change = Some(callback);
    }

    /// Register position callback, called with (currentTime, duration)
    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self, callback: Function) {
        self.on_time_update = Some(callback);
    }

    /// Register volume callback, called with (volume, isMuted)
    #[wasm_bindgen(js_name = onVolumeChange)]
    pub fn on_volume_change(&mut self, callback: Function) {
        self.on_volume_change = Some(callback);
    }

    /// Register track callback, called with the current `WasmTrack` (or null)
    /// whenever the active track changes
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&mut self, callback: Function) {
        self.on_track_change = Some(callback);
    }

    /// Register error callback, called with a message
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    // ===== Internal =====

    fn settle(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {}
            Err(e) if e.is_user_facing() => self.report_error(&e.to_string()),
            Err(e) => tracing::debug!("Ignored: {}", e),
        }
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        let mut track_changed = false;
        for event in self.inner.drain_selection_events() {
            if matches!(
                event,
                SelectionEvent::ActiveChanged { .. } | SelectionEvent::Reset
            ) {
                track_changed = true;
            }
        }

        for event in self.inner.drain_events() {
            match event {
                PlayerEvent::StateChanged { state } => {
                    if let Some(ref cb) = self.on_state_change {
                        cb.call1(&JsValue::NULL, &JsValue::from_str(state.label()))
                            .ok();
                    }
                }
                PlayerEvent::PositionChanged {
                    current_time,
                    duration,
                } => {
                    if let Some(ref cb) = self.on_time_update {
                        cb.call2(
                            &JsValue::NULL,
                            &JsValue::from_f64(current_time),
                            &JsValue::from_f64(duration),
                        )
                        .ok();
                    }
                }
                PlayerEvent::VolumeChanged { volume, is_muted } => {
                    if let Some(ref cb) = self.on_volume_change {
                        cb.call2(
                            &JsValue::NULL,
                            &JsValue::from_f64(f64::from(volume)),
                            &JsValue::from_bool(is_muted),
                        )
                        .ok();
                    }
                }
                PlayerEvent::PlaybackRejected { reason } => self.report_error(&reason),
                PlayerEvent::TrackBound { .. } => track_changed = true,
                PlayerEvent::TrackEnded => {}
            }
        }

        if track_changed {
            if let Some(ref cb) = self.on_track_change {
                cb.call1(&JsValue::NULL, &self.current_track()).ok();
            }
        }
    }

    fn report_error(&self, message: &str) {
        web_sys::console::warn_1(&JsValue::from_str(message));
        if let Some(ref cb) = self.on_error {
            cb.call1(&JsValue::NULL, &JsValue::from_str(message)).ok();
        }
    }
}

fn to_js(error: PlayerError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
