use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::{
    model::{TemperatureUnit, WeatherRequest},
    stream::StreamSettings,
};

pub const DEFAULT_REFRESH_MINUTES: u64 = 30;

const ENV_API_KEY: &str = "WEATHERGLYPH_API_KEY";
const ENV_CITY: &str = "WEATHERGLYPH_CITY";
const ENV_UNIT: &str = "WEATHERGLYPH_UNIT";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// city = "Minneapolis, MN"
/// unit = "F"
/// refresh_minutes = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// City name or "city, region", passed as-is to the weather API.
    pub city: Option<String>,

    #[serde(default)]
    pub unit: TemperatureUnit,

    /// Interval between refreshes in `watch` mode.
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,

    /// Base URL override for the weather API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

fn default_refresh_minutes() -> u64 {
    DEFAULT_REFRESH_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            city: None,
            unit: TemperatureUnit::default(),
            refresh_minutes: DEFAULT_REFRESH_MINUTES,
            endpoint: None,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Save config to the platform config dir.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherglyph", "weatherglyph")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.refresh_minutes == 0 {
            return Err(anyhow!("refresh_minutes must be greater than zero"));
        }
        Ok(())
    }

    /// Overlay `WEATHERGLYPH_*` environment variables on top of the file values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(city) = lookup(ENV_CITY) {
            self.city = Some(city);
        }
        if let Some(unit) = lookup(ENV_UNIT) {
            self.unit = unit
                .parse()
                .with_context(|| format!("Invalid value in {ENV_UNIT}"))?;
        }
        Ok(())
    }

    /// Settings for a single stream refresh, failing with a hint when incomplete.
    pub fn stream_settings(&self) -> Result<StreamSettings> {
        let api_key = non_empty(self.api_key.as_deref()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weatherglyph configure` and enter your OpenWeather API key."
            )
        })?;
        let city = non_empty(self.city.as_deref()).ok_or_else(|| {
            anyhow!(
                "No city configured.\n\
                 Hint: run `weatherglyph configure` or pass `--city`."
            )
        })?;

        Ok(StreamSettings {
            request: WeatherRequest::new(city, api_key),
            unit: self.unit,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
