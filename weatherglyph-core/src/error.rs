//! Error types shared across the core crate.
//!
//! Formatting itself never fails: unknown conditions resolve to an empty
//! glyph. Errors only come from the edges, i.e. unit parsing, the weather
//! endpoint and the device settings.

use thiserror::Error;

/// Errors raised while validating formatter inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid temperature unit '{0}'. Supported units: C, F.")]
    InvalidUnit(String),
}

/// Errors raised by a [`crate::WeatherClient`].
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to send request to {endpoint}: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Malformed JSON response from {endpoint}: {source}")]
    Malformed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather API returned cod {cod}: {message}")]
    Api { cod: i64, message: String },
}

/// Errors raised while reading the user settings a device sends along.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("malformed user setting: {0}")]
    Malformed(String),

    #[error("malformed user setting: {0}")]
    Unit(#[from] FormatError),
}

/// Errors raised while refreshing or pushing a stream value.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("Failed to push stream update: {0}")]
    Push(String),
}
