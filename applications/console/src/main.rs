/// Tune Console - drive the player from the terminal
mod app;
mod command;
mod config;

use anyhow::Context;
use app::{Console, Flow};
use clap::Parser;
use command::Command;
use config::ConsoleConfig;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tune-console")]
#[command(about = "Tune player with a simulated audio element", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./tune.toml when present)
    #[arg(short, long, env = "TUNE_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tune_player=info,tune_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ConsoleConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let mut console = Console::new(&config).context("Invalid configuration")?;

    tracing::info!("Type 'help' for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                continue;
            }
        };

        let (flow, message) = console.execute(command);
        if let Some(message) = message {
            writeln!(stdout, "{}", message)?;
        }
        if flow == Flow::Quit {
            break;
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
