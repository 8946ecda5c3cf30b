//! WASM bindings for tune-player
//!
//! Binds the player to a browser `<audio>` element and exposes a
//! JavaScript-friendly API for the web front end.

pub mod media;
pub mod player;
pub mod types;

pub use media::HtmlAudioMedia;
pub use player::WasmPlayer;
pub use types::WasmTrack;
