//! Track catalog collaborator
//!
//! Resolves a track id to its metadata and a playable audio URL. Relative
//! audio and artwork references are resolved against the public base URL of
//! the storage bucket the catalog was configured with.

use crate::error::{PlayerError, Result};
use crate::types::{Track, TrackId};
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Source of track metadata
pub trait TrackCatalog {
    /// Look a track up; `None` is a valid "not found" answer
    ///
    /// The returned track carries a playable `audio_url`.
    fn resolve(&self, id: &TrackId) -> Option<Track>;
}

/// Catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tracks: HashMap<TrackId, Track>,
    order: Vec<TrackId>,
    storage_base: Option<Url>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog resolving relative references against `base`
    pub fn with_storage_base(base: &str) -> Result<Self> {
        let mut url = Url::parse(base)
            .map_err(|e| PlayerError::Config(format!("invalid storage base URL {base}: {e}")))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            storage_base: Some(url),
            ..Self::default()
        })
    }

    /// Add or replace a track
    pub fn insert(&mut self, track: Track) {
        if !self.tracks.contains_key(&track.id) {
            self.order.push(track.id.clone());
        }
        self.tracks.insert(track.id.clone(), track);
    }

    /// Add several tracks
    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        for track in tracks {
            self.insert(track);
        }
    }

    /// Ids in insertion order
    pub fn ids(&self) -> Vec<TrackId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn resolve_reference(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Ok(url) = Url::parse(reference) {
            return Some(url.to_string());
        }
        match &self.storage_base {
            Some(base) => base
                .join(reference.trim_start_matches('/'))
                .ok()
                .map(|url| url.to_string()),
            None => Some(reference.to_string()),
        }
    }
}

impl TrackCatalog for InMemoryCatalog {
    fn resolve(&self, id: &TrackId) -> Option<Track> {
        let track = self.tracks.get(id)?;
        let Some(audio_url) = self.resolve_reference(&track.audio_url) else {
            debug!("Track {} has no audio reference", id);
            return None;
        };
        let artwork_url = track
            .artwork_url
            .as_deref()
            .and_then(|artwork| self.resolve_reference(artwork));

        Some(Track {
            audio_url,
            artwork_url,
            ..track.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, audio_url: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: format!("Track {id}"),
            author: "Test Author".to_string(),
            artwork_url: None,
            audio_url: audio_url.to_string(),
            duration_secs: None,
        }
    }

    #[test]
    fn unknown_id_is_a_miss() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.resolve(&TrackId::new("nope")).is_none());
    }

    #[test]
    fn absolute_urls_pass_through() {
        let mut catalog = InMemoryCatalog::with_storage_base("https://cdn.example.com/songs").unwrap();
        catalog.insert(track("a", "https://other.example.com/a.mp3"));

        let resolved = catalog.resolve(&TrackId::new("a")).unwrap();
        assert_eq!(resolved.audio_url, "https://other.example.com/a.mp3");
    }

    #[test]
    fn relative_paths_join_storage_base() {
        let mut catalog = InMemoryCatalog::with_storage_base(
            "https://project.example.co/storage/v1/object/public/songs",
        )
        .unwrap();
        let mut with_art = track("a", "song-a-123.mp3");
        with_art.artwork_url = Some("/images/a.png".to_string());
        catalog.insert(with_art);

        let resolved = catalog.resolve(&TrackId::new("a")).unwrap();
        assert_eq!(
            resolved.audio_url,
            "https://project.example.co/storage/v1/object/public/songs/song-a-123.mp3"
        );
        assert_eq!(
            resolved.artwork_url.as_deref(),
            Some("https://project.example.co/storage/v1/object/public/songs/images/a.png")
        );
    }

    #[test]
    fn relative_paths_without_base_are_kept() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(track("a", "music/a.mp3"));
        assert_eq!(
            catalog.resolve(&TrackId::new("a")).unwrap().audio_url,
            "music/a.mp3"
        );
    }

    #[test]
    fn empty_audio_reference_is_a_miss() {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(track("a", "  "));
        assert!(catalog.resolve(&TrackId::new("a")).is_none());
    }

    #[test]
    fn insertion_order_is_kept_and_replacements_do_not_duplicate() {
        let mut catalog = InMemoryCatalog::new();
        catalog.extend([track("b", "b.mp3"), track("a", "a.mp3")]);
        catalog.insert(track("b", "b2.mp3"));

        assert_eq!(catalog.ids(), vec![TrackId::new("b"), TrackId::new("a")]);
        assert_eq!(catalog.resolve(&TrackId::new("b")).unwrap().audio_url, "b2.mp3");
    }

    #[test]
    fn invalid_base_is_a_config_error() {
        assert!(matches!(
            InMemoryCatalog::with_storage_base("not a url"),
            Err(PlayerError::Config(_))
        ));
    }
}
