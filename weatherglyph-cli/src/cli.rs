use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use weatherglyph_core::{
    Config, DisplayString, StreamSettings, StreamSink, TemperatureUnit, UserSettings, WeatherPayload,
    client_from_config, format,
    stream::{self, ScheduleRecord},
};

use crate::sink::StdoutSink;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherglyph", version, about = "Weather glyph stream for watch faces")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set API key, city and unit.
    Configure,

    /// Fetch current weather once and print the stream value.
    Show {
        /// City to look up instead of the configured one.
        #[arg(long)]
        city: Option<String>,

        /// Unit to display, C or F.
        #[arg(long)]
        unit: Option<TemperatureUnit>,

        /// Device user settings JSON ({"ApiKey": {"name": ..}, ...}) to use instead of the config.
        #[arg(long, conflicts_with_all = ["city", "unit"])]
        settings: Option<PathBuf>,
    },

    /// Format a saved weather payload without touching the network.
    Format {
        /// Payload JSON file, or "-" for stdin.
        input: PathBuf,

        /// Unit to display, C or F.
        #[arg(long)]
        unit: Option<TemperatureUnit>,
    },

    /// Refresh on a fixed interval and print every update.
    Watch {
        /// Minutes between refreshes; defaults to `refresh_minutes` from the config.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        minutes: Option<u64>,
    },

    /// Print the settings a device is asked for, as JSON.
    Schema,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, unit, settings } => show(city, unit, settings).await,
            Command::Format { input, unit } => format_payload(&input, unit),
            Command::Watch { minutes } => watch(minutes).await,
            Command::Schema => {
                let schema = serde_json::to_string_pretty(&stream::settings_schema())
                    .context("Failed to serialize settings schema")?;
                println!("{schema}");
                Ok(())
            }
        }
    }
}

fn load_config() -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_env()?;
    Ok(config)
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let mut key_prompt = Text::new("OpenWeather API key:");
    if let Some(existing) = config.api_key.as_deref() {
        key_prompt = key_prompt.with_default(existing);
    }
    let api_key = key_prompt.prompt().context("Failed to read API key")?;

    let mut city_prompt = Text::new("City:").with_help_message("e.g. Minneapolis, MN");
    if let Some(existing) = config.city.as_deref() {
        city_prompt = city_prompt.with_default(existing);
    }
    let city = city_prompt.prompt().context("Failed to read city")?;

    let units = TemperatureUnit::all().to_vec();
    let cursor = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    let unit = Select::new("Temperature unit:", units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read temperature unit")?;

    config.api_key = Some(api_key.trim().to_string());
    config.city = Some(city.trim().to_string());
    config.unit = unit;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    unit: Option<TemperatureUnit>,
    settings_file: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config()?;

    let settings = match settings_file {
        Some(path) => settings_from_file(&path)?,
        None => {
            if let Some(city) = city {
                config.city = Some(city);
            }
            if let Some(unit) = unit {
                config.unit = unit;
            }
            config.stream_settings()?
        }
    };

    let client = client_from_config(&config);
    let value = stream::refresh(client.as_ref(), &settings)
        .await
        .with_context(|| format!("Failed to refresh weather for {}", settings.request.city))?;

    StdoutSink::default().push(&value)?;
    Ok(())
}

/// Reads device user settings (`{"ApiKey": {"name": ..}, ...}`) from a file or stdin.
fn settings_from_file(path: &Path) -> Result<StreamSettings> {
    let raw: UserSettings = serde_json::from_str(&read_input(path)?)
        .with_context(|| format!("Failed to parse user settings: {}", path.display()))?;
    Ok(StreamSettings::try_from(&raw)?)
}

fn format_payload(input: &Path, unit: Option<TemperatureUnit>) -> Result<()> {
    let unit = match unit {
        Some(unit) => unit,
        None => load_config()?.unit,
    };

    StdoutSink::default().push(&render_payload(input, unit)?)?;
    Ok(())
}

fn render_payload(input: &Path, unit: TemperatureUnit) -> Result<DisplayString> {
    let payload: WeatherPayload = serde_json::from_str(&read_input(input)?)
        .with_context(|| format!("Failed to parse weather payload: {}", input.display()))?;

    if payload.cod != 200 {
        warn!(cod = payload.cod, "payload does not report success; formatting anyway");
    }

    Ok(format(&payload, unit))
}

async fn watch(minutes: Option<u64>) -> Result<()> {
    let config = load_config()?;
    let minutes = minutes.unwrap_or(config.refresh_minutes);

    let client = client_from_config(&config);
    let records = [ScheduleRecord {
        settings: config.stream_settings()?,
        sink: StdoutSink { timestamped: true },
    }];

    let mut ticker = tokio::time::interval(Duration::from_secs(minutes.saturating_mul(60)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(minutes, "watching weather");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = stream::push_schedule(client.as_ref(), &records).await;
                debug!(pushed = report.pushed, dropped = report.dropped, "schedule tick done");
            }
            res = tokio::signal::ctrl_c() => {
                res.context("Failed to listen for Ctrl-C")?;
                info!("stopping watch");
                return Ok(());
            }
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("Failed to read stdin");
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
