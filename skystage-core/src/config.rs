use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::scene::sun::Gradient;

/// OpenWeather current-weather endpoint used when the config does not
/// override it.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Tunable presentation constants, fixed at deployment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    /// How long a fade between two audio tracks takes, in seconds.
    pub crossfade_secs: f32,
    /// Gain an audio track settles at once it has full focus.
    pub audio_gain_ceiling: f32,
    /// Sun light color over the daylight interval.
    pub sun_gradient: Gradient,
    /// Ambient light color over the daylight interval.
    pub ambient_gradient: Gradient,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            crossfade_secs: 2.0,
            audio_gain_ceiling: 0.2,
            sun_gradient: Gradient::sun_default(),
            ambient_gradient: Gradient::ambient_default(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [scene]
/// crossfade_secs = 2.0
/// audio_gain_ceiling = 0.2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather API key; required before any fetch can be issued.
    pub api_key: Option<String>,
    /// Endpoint override, mainly for testing against a local server.
    pub endpoint: Option<String>,
    pub scene: SceneTuning,
}

impl Config {
    /// The configured API key, or an error with a setup hint.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skystage configure` and enter your OpenWeather API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skystage", "skystage")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
