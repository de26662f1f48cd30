//! Core library for the `weatherglyph` watch stream.
//!
//! This crate defines:
//! - The weather-to-display-string pipeline (unit conversion, icon glyphs, truncation)
//! - An OpenWeatherMap client behind the [`WeatherClient`] trait
//! - The device-facing stream handlers (settings, refresh, schedule push)
//! - Configuration handling for the CLI
//!
//! It is used by `weatherglyph-cli`, but the formatter has no I/O and can be
//! reused anywhere a payload is already at hand.

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod icon;
pub mod model;
pub mod provider;
pub mod stream;

pub use config::Config;
pub use convert::{convert, convert_str};
pub use error::{FormatError, SettingsError, StreamError, WeatherError};
pub use format::format;
pub use icon::{Glyph, resolve_icon, resolve_icon_str};
pub use model::{Condition, DisplayString, MainReadings, TemperatureUnit, WeatherPayload, WeatherRequest};
pub use provider::{WeatherClient, client_from_config, openweather::OpenWeatherClient};
pub use stream::{StreamSettings, StreamSink, UserSettings};
