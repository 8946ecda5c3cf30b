/// Console configuration
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tune_player::{
    InMemoryCatalog, PlayerConfig, PlayerError, Result, SimulatedMedia, Track, TrackCatalog,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Public base URL of the song storage bucket
    #[serde(default)]
    pub storage_base_url: Option<String>,

    /// Simulated length of tracks without a known duration
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            storage_base_url: None,
            default_duration_secs: default_duration_secs(),
        }
    }
}

fn default_duration_secs() -> f64 {
    180.0
}

impl ConsoleConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tune.toml` in the working
    /// directory is used when present. `TUNE_`-prefixed variables override
    /// both, with `__` separating nested keys (`TUNE_PLAYER__AUTOPLAY=false`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("tune.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TUNE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player.validate()?;

        if self.tracks.is_empty() {
            return Err(PlayerError::Config(
                "No tracks configured (add [[tracks]] entries)".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for track in &self.tracks {
            if !seen.insert(&track.id) {
                return Err(PlayerError::Config(format!(
                    "Duplicate track id: {}",
                    track.id
                )));
            }
        }

        if !self.catalog.default_duration_secs.is_finite()
            || self.catalog.default_duration_secs <= 0.0
        {
            return Err(PlayerError::Config(format!(
                "default_duration_secs must be positive, got {}",
                self.catalog.default_duration_secs
            )));
        }

        Ok(())
    }

    /// Catalog holding the configured tracks
    pub fn build_catalog(&self) -> Result<InMemoryCatalog> {
        let mut catalog = match &self.catalog.storage_base_url {
            Some(base) => InMemoryCatalog::with_storage_base(base)?,
            None => InMemoryCatalog::new(),
        };
        catalog.extend(self.tracks.iter().cloned());
        Ok(catalog)
    }

    /// Simulated media element knowing each track's duration
    pub fn build_media(&self, catalog: &InMemoryCatalog) -> SimulatedMedia {
        let mut media = SimulatedMedia::new(self.catalog.default_duration_secs);
        for track in &self.tracks {
            let (Some(duration), Some(resolved)) = (track.duration_secs, catalog.resolve(&track.id))
            else {
                continue;
            };
            media = media.with_duration(resolved.audio_url, duration);
        }
        media
    }
}
