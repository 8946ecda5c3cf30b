//! WASM-compatible type definitions

use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Track as exchanged with JavaScript
///
/// camelCase field names, plain strings for ids and URLs.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrack {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub artwork_url: Option<String>,
    pub audio_url: String,
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

// Conversion from internal Track to WASM type
impl From<&Track> for WasmTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.to_string(),
            title: track.title.clone(),
            author: track.author.clone(),
            artwork_url: track.artwork_url.clone(),
            audio_url: track.audio_url.clone(),
            duration_secs: track.duration_secs,
        }
    }
}

// Conversion from WASM type to internal Track
impl From<WasmTrack> for Track {
    fn from(track: WasmTrack) -> Self {
        Self {
            id: TrackId::new(track.id),
            title: track.title,
            author: track.author,
            artwork_url: track.artwork_url,
            audio_url: track.audio_url,
            duration_secs: track.duration_secs,
        }
    }
}
