//! Playlist selection store
//!
//! Session-scoped state holding the ordered track ids a host view loaded and
//! the id currently targeted for playback:
//!
//! ```text
//! ids:    [a, b, c, b]   (duplicates allowed, order significant)
//! active: Some(c)        (need not be a member of ids)
//! ```
//!
//! Every mutation bumps `revision` and queues a [`SelectionEvent`] so
//! observers (the session) can re-evaluate.

use crate::events::SelectionEvent;
use crate::types::TrackId;

/// Ordered track ids plus the active id
#[derive(Debug, Clone, Default)]
pub struct PlaylistSelection {
    ids: Vec<TrackId>,
    active_id: Option<TrackId>,
    revision: u64,
    pending_events: Vec<SelectionEvent>,
}

impl PlaylistSelection {
    /// Most events kept for an observer that does not drain; older ones are
    /// dropped first
    pub const MAX_PENDING_EVENTS: usize = 64;

    /// Create an empty selection (session start)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ordered id list
    ///
    /// Leaves the active id untouched.
    pub fn set_ids(&mut self, ids: Vec<TrackId>) {
        let length = ids.len();
        self.ids = ids;
        self.touch(SelectionEvent::IdsReplaced { length });
    }

    /// Set the active id
    ///
    /// No membership check: single-track playback may target an id outside
    /// the loaded list.
    pub fn set_active_id(&mut self, id: TrackId) {
        self.active_id = Some(id.clone());
        self.touch(SelectionEvent::ActiveChanged {
            active_id: Some(id),
        });
    }

    /// Replace the list and activate one of its entries in one step
    pub fn select(&mut self, id: TrackId, ids: Vec<TrackId>) {
        self.set_ids(ids);
        self.set_active_id(id);
    }

    /// Clear both the list and the active id (logout)
    pub fn reset(&mut self) {
        self.ids.clear();
        self.active_id = None;
        self.touch(SelectionEvent::Reset);
    }

    /// Ordered ids
    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }

    /// Active id, if any
    pub fn active_id(&self) -> Option<&TrackId> {
        self.active_id.as_ref()
    }

    /// Index of the first occurrence of the active id in the list
    pub fn position_of_active(&self) -> Option<usize> {
        let active = self.active_id.as_ref()?;
        self.ids.iter().position(|id| id == active)
    }

    /// Number of ids in the list
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Monotonic change counter
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drain all pending selection events
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn touch(&mut self, event: SelectionEvent) {
        self.revision += 1;
        if self.pending_events.len() >= Self::MAX_PENDING_EVENTS {
            self.pending_events.remove(0);
        }
        self.pending_events.push(event);
    }
}
