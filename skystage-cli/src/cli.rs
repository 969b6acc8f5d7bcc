use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use skystage_core::{Config, ScenePresenter, provider_from_config};

use crate::terminal::TerminalScene;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skystage", version, about = "Weather-driven scene controller")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the local config file.
    Configure,

    /// Fetch current weather for a city and stage the scene from it.
    Show {
        /// City name, e.g. "Kyiv" or "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

/// Host frame cadence while a crossfade is in flight.
const FRAME: Duration = Duration::from_millis(16);

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut presenter = ScenePresenter::new(provider, config.scene, TerminalScene::default());
    presenter.search(city).await;

    // Drive the audio crossfade to completion, one frame at a time.
    let mut frames = tokio::time::interval(FRAME);
    let mut last = Instant::now();
    while presenter.is_fading() {
        frames.tick().await;
        let now = Instant::now();
        presenter.tick(now.duration_since(last).as_secs_f32());
        last = now;
    }

    presenter.host().render_snapshot(presenter.current_report());
    Ok(())
}
