/// Line commands understood by the console
use anyhow::{anyhow, bail, Context};
use std::str::FromStr;
use tune_player::TrackId;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Select a track out of the whole catalog
    Play(TrackId),
    Toggle,
    Next,
    Prev,
    /// Seek to an absolute position in seconds
    Seek(f64),
    Mute,
    Volume(f32),
    /// Advance simulated playback time
    Tick(f64),
    Status,
    List,
    Logout,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  play <id>       play a track from the catalog
  toggle          play/pause
  next | prev     move through the list
  seek <secs>     jump to a position
  mute            toggle mute
  volume <0..1>   set volume
  tick <secs>     advance playback time
  status          show the player line
  list            show catalog tracks
  logout          clear selection and stop
  quit            exit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            bail!("empty command");
        };
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments for '{}'", word);
        }

        let command = match word.to_ascii_lowercase().as_str() {
            "play" | "p" => Command::Play(TrackId::new(required(word, arg)?)),
            "toggle" | "t" | "pause" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "seek" => Command::Seek(
                required(word, arg)?
                    .parse()
                    .context("seek expects seconds")?,
            ),
            "mute" | "m" => Command::Mute,
            "volume" | "vol" => Command::Volume(
                required(word, arg)?
                    .parse()
                    .context("volume expects a level between 0 and 1")?,
            ),
            "tick" => Command::Tick(
                arg.map(str::parse)
                    .transpose()
                    .context("tick expects seconds")?
                    .unwrap_or(1.0),
            ),
            "status" | "s" => Command::Status,
            "list" | "ls" => Command::List,
            "logout" => Command::Logout,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(anyhow!("unknown command '{}' (try 'help')", other)),
        };

        Ok(command)
    }
}

fn required<'a>(word: &str, arg: Option<&'a str>) -> anyhow::Result<&'a str> {
    arg.ok_or_else(|| anyhow!("'{}' needs an argument", word))
}
