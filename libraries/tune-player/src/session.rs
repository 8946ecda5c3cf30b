//! Player session - host glue between selection, catalog and controller
//!
//! One session lives from app start to logout. It owns the playlist
//! selection (no global singleton) and re-evaluates it after every
//! mutation: the active id is resolved through the catalog and the
//! controller is rebound whenever the resolved audio URL changes.

use crate::{
    catalog::TrackCatalog,
    controller::PlayerController,
    error::{PlayerError, Result},
    events::{PlayerEvent, SelectionEvent},
    media::MediaElement,
    store::PlaylistSelection,
    types::{PlayerConfig, Track, TrackId},
};
use tracing::{debug, warn};

/// Selection + catalog + controller
pub struct PlayerSession<C: TrackCatalog, M: MediaElement> {
    selection: PlaylistSelection,
    catalog: C,
    controller: PlayerController<M>,
    current_track: Option<Track>,
    synced_revision: Option<u64>,
}

impl<C: TrackCatalog, M: MediaElement> PlayerSession<C, M> {
    /// Start a session with an empty selection
    pub fn new(catalog: C, media: M, config: PlayerConfig) -> Self {
        Self {
            selection: PlaylistSelection::new(),
            catalog,
            controller: PlayerController::new(media, config),
            current_track: None,
            synced_revision: None,
        }
    }

    // ===== Selection =====

    /// Play `id` from the list `ids` (a click on a song row)
    pub fn select(&mut self, id: TrackId, ids: Vec<TrackId>) -> Result<()> {
        self.selection.select(id, ids);
        self.sync()
    }

    /// Play a single track without changing the loaded list
    pub fn play_track(&mut self, id: TrackId) -> Result<()> {
        self.selection.set_active_id(id);
        self.sync()
    }

    /// Replace the loaded list, keeping the active track
    pub fn set_ids(&mut self, ids: Vec<TrackId>) -> Result<()> {
        self.selection.set_ids(ids);
        self.sync()
    }

    /// Advance to the next track (wraps)
    pub fn play_next(&mut self) -> Result<()> {
        if self.controller.play_next(&mut self.selection).is_none() {
            debug!("Next ignored: empty list");
        }
        self.sync()
    }

    /// Go back to the previous track (wraps)
    pub fn play_previous(&mut self) -> Result<()> {
        if self.controller.play_previous(&mut self.selection).is_none() {
            debug!("Previous ignored: empty list");
        }
        self.sync()
    }

    /// Clear the selection and stop playback
    pub fn logout(&mut self) {
        self.selection.reset();
        // An empty selection always syncs to idle
        let _ = self.sync();
    }

    // ===== Controls =====

    pub fn toggle_play_pause(&mut self) -> Result<()> {
        self.controller.toggle_play_pause()
    }

    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        self.controller.seek(seconds)
    }

    pub fn toggle_mute(&mut self) {
        self.controller.toggle_mute();
    }

    pub fn set_volume(&mut self, level: f32) {
        self.controller.set_volume(level);
    }

    /// Apply pending media events
    pub fn pump(&mut self) -> usize {
        self.controller.pump_events()
    }

    // ===== Synchronization =====

    /// Re-evaluate the selection if it changed since the last sync
    ///
    /// An active id the catalog cannot resolve leaves the controller idle and
    /// returns `Err(LookupMiss)`.
    pub fn sync(&mut self) -> Result<()> {
        let revision = self.selection.revision();
        if self.synced_revision == Some(revision) {
            return Ok(());
        }
        self.synced_revision = Some(revision);

        let Some(id) = self.selection.active_id().cloned() else {
            self.current_track = None;
            self.controller.unbind();
            return Ok(());
        };

        match self.catalog.resolve(&id) {
            Some(track) => {
                let url = track.audio_url.clone();
                self.current_track = Some(track);
                self.controller.bind_source(&url)
            }
            None => {
                warn!("Active track {} not found in catalog", id);
                self.current_track = None;
                self.controller.unbind();
                Err(PlayerError::LookupMiss(id))
            }
        }
    }

    /// Force a re-evaluation (e.g. after the catalog changed)
    pub fn resync(&mut self) -> Result<()> {
        self.synced_revision = None;
        self.sync()
    }

    // ===== Accessors =====

    pub fn selection(&self) -> &PlaylistSelection {
        &self.selection
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Mutable catalog access; call [`resync`](Self::resync) afterwards
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn controller(&self) -> &PlayerController<M> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlayerController<M> {
        &mut self.controller
    }

    /// Catalog record of the bound track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Drain controller events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.controller.drain_events()
    }

    /// Drain selection events
    pub fn drain_selection_events(&mut self) -> Vec<SelectionEvent> {
        self.selection.drain_events()
    }
}
