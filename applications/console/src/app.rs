/// Console player state
use crate::command::{Command, HELP};
use crate::config::ConsoleConfig;
use tune_player::{
    InMemoryCatalog, PlayerError, PlayerEvent, PlayerSession, Result, SelectionEvent,
    SimulatedMedia, TrackCatalog,
};

/// What the input loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    session: PlayerSession<InMemoryCatalog, SimulatedMedia>,
}

impl Console {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let catalog = config.build_catalog()?;
        let media = config.build_media(&catalog);

        tracing::info!(
            "Loaded {} tracks (autoplay: {}, mute: {:?})",
            catalog.len(),
            config.player.autoplay,
            config.player.mute_behavior
        );

        Ok(Self {
            session: PlayerSession::new(catalog, media, config.player.clone()),
        })
    }

    /// Run one command and return the text to show the user
    pub fn execute(&mut self, command: Command) -> (Flow, Option<String>) {
        let result = match command {
            Command::Play(id) => {
                let ids = self.session.catalog().ids();
                self.session.select(id, ids)
            }
            Command::Toggle => self.session.toggle_play_pause(),
            Command::Next => self.session.play_next(),
            Command::Prev => self.session.play_previous(),
            Command::Seek(seconds) => self.session.seek(seconds),
            Command::Mute => {
                self.session.toggle_mute();
                Ok(())
            }
            Command::Volume(level) => {
                self.session.set_volume(level);
                Ok(())
            }
            Command::Tick(seconds) => {
                self.session.pump();
                self.session.controller_mut().media_mut().tick(seconds);
                Ok(())
            }
            Command::Status => Ok(()),
            Command::List => return (Flow::Continue, Some(self.track_list())),
            Command::Logout => {
                self.session.logout();
                Ok(())
            }
            Command::Help => return (Flow::Continue, Some(HELP.to_string())),
            Command::Quit => return (Flow::Quit, None),
        };

        self.session.pump();
        self.log_events();

        let message = match result {
            Ok(()) => self.status_line(),
            Err(PlayerError::NoActiveTrack) => "nothing selected".to_string(),
            Err(PlayerError::LookupMiss(id)) => {
                format!("{} not in catalog | {}", id, self.status_line())
            }
            Err(e) => format!("{} | {}", e, self.status_line()),
        };
        (Flow::Continue, Some(message))
    }

    /// `title - author [state] m:ss / m:ss vol`
    pub fn status_line(&self) -> String {
        let controller = self.session.controller();
        let volume = if controller.is_muted() {
            "muted".to_string()
        } else {
            format!("{:.0}%", controller.volume() * 100.0)
        };

        let now_playing = match self.session.current_track() {
            Some(track) => format!("{} - {}", track.title, track.author),
            None => "(no track)".to_string(),
        };

        format!(
            "{} [{}] {} / {} {}",
            now_playing,
            controller.state().label(),
            controller.formatted_current_time(),
            controller.formatted_duration(),
            volume
        )
    }

    fn track_list(&self) -> String {
        let catalog = self.session.catalog();
        let active = self.session.selection().active_id();

        catalog
            .ids()
            .iter()
            .filter_map(|id| catalog.resolve(id))
            .map(|track| {
                let marker = if active == Some(&track.id) { '>' } else { ' ' };
                format!("{} {:>4}  {} - {}", marker, track.id, track.title, track.author)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn log_events(&mut self) {
        for event in self.session.drain_selection_events() {
            match event {
                SelectionEvent::ActiveChanged { active_id } => {
                    tracing::debug!("Active track: {:?}", active_id);
                }
                other => tracing::debug!("Selection: {:?}", other),
            }
        }

        for event in self.session.drain_events() {
            match event {
                PlayerEvent::TrackBound { url } => tracing::info!("Loading {}", url),
                PlayerEvent::TrackEnded => tracing::info!("Track ended"),
                PlayerEvent::PlaybackRejected { reason } => {
                    tracing::warn!("Playback rejected: {}", reason);
                }
                other => tracing::trace!("Player: {:?}", other),
            }
        }
    }

    pub fn session(&self) -> &PlayerSession<InMemoryCatalog, SimulatedMedia> {
        &self.session
    }
}
