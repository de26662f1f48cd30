//! Device-facing side of the weather stream.
//!
//! A watch face asks for the settings in [`settings_schema`], sends them back
//! as [`UserSettings`] when the stream is subscribed, and then receives a
//! fresh [`DisplayString`] on every schedule tick through a [`StreamSink`].

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{SettingsError, StreamError},
    format::format,
    model::{DisplayString, TemperatureUnit, WeatherRequest},
    provider::WeatherClient,
};

pub const API_KEY_SETTING: &str = "ApiKey";
pub const CITY_SETTING: &str = "City";
pub const UNIT_SETTING: &str = "format";

const AS_YOU_TYPE_DELAY: u32 = 45;

/// A single setting value as the device reports it: `{"name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingValue {
    pub name: String,
}

/// User settings attached to a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(rename = "ApiKey")]
    pub api_key: Option<SettingValue>,
    #[serde(rename = "City")]
    pub city: Option<SettingValue>,
    #[serde(rename = "format")]
    pub unit: Option<SettingValue>,
}

/// Validated settings for one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSettings {
    pub request: WeatherRequest,
    pub unit: TemperatureUnit,
}

impl TryFrom<&UserSettings> for StreamSettings {
    type Error = SettingsError;

    fn try_from(settings: &UserSettings) -> Result<Self, Self::Error> {
        let api_key = required(settings.api_key.as_ref(), API_KEY_SETTING)?;
        let city = required(settings.city.as_ref(), CITY_SETTING)?;
        let unit = required(settings.unit.as_ref(), UNIT_SETTING)?.parse()?;

        Ok(Self {
            request: WeatherRequest::new(city, api_key),
            unit,
        })
    }
}

fn required<'a>(value: Option<&'a SettingValue>, name: &str) -> Result<&'a str, SettingsError> {
    value
        .map(|v| v.name.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SettingsError::Malformed(format!("missing '{name}'")))
}

/// A setting the stream asks the device to collect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SettingDescriptor {
    #[serde(rename = "autocomplete")]
    Autocomplete {
        name: &'static str,
        hint: &'static str,
        dynamic: bool,
        #[serde(rename = "asYouType")]
        as_you_type: u32,
    },
    #[serde(rename = "gridList")]
    GridList {
        name: &'static str,
        options: Vec<&'static str>,
    },
}

/// Settings requested when the stream is dragged onto a watch face.
pub fn settings_schema() -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor::Autocomplete {
            name: API_KEY_SETTING,
            hint: "Enter OpenWeather Api Key",
            dynamic: true,
            as_you_type: AS_YOU_TYPE_DELAY,
        },
        SettingDescriptor::Autocomplete {
            name: CITY_SETTING,
            hint: "Enter City, eg Minneapolis, MN",
            dynamic: true,
            as_you_type: AS_YOU_TYPE_DELAY,
        },
        SettingDescriptor::GridList {
            name: UNIT_SETTING,
            options: TemperatureUnit::all().iter().map(TemperatureUnit::letter).collect(),
        },
    ]
}

/// Where stream values end up: a device push, a response, stdout.
pub trait StreamSink {
    fn push(&self, value: &DisplayString) -> Result<(), StreamError>;
}

/// Fetch and format the current value for one subscription.
pub async fn refresh(
    client: &dyn WeatherClient,
    settings: &StreamSettings,
) -> Result<DisplayString, StreamError> {
    let payload = client.current(&settings.request).await?;
    Ok(format(&payload, settings.unit))
}

/// Handle a new subscription: validate its settings, then [`refresh`].
pub async fn subscribe(
    client: &dyn WeatherClient,
    settings: &UserSettings,
) -> Result<DisplayString, StreamError> {
    let settings = StreamSettings::try_from(settings)?;
    refresh(client, &settings).await
}

/// One subscriber to update on a schedule tick.
#[derive(Debug)]
pub struct ScheduleRecord<S> {
    pub settings: StreamSettings,
    pub sink: S,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    pub pushed: usize,
    pub dropped: usize,
}

/// Refresh and push every record concurrently. A failing record is logged
/// and skipped; the others are not held up by it.
pub async fn push_schedule<S: StreamSink>(
    client: &dyn WeatherClient,
    records: &[ScheduleRecord<S>],
) -> ScheduleReport {
    let updates = records.iter().map(|record| async move {
        let city = &record.settings.request.city;

        let result = match refresh(client, &record.settings).await {
            Ok(value) => record.sink.push(&value).map(|()| value),
            Err(err) => Err(err),
        };

        match result {
            Ok(value) => {
                info!(%city, %value, "stream updated");
                true
            }
            Err(err) => {
                warn!(%city, error = %err, "dropping stream update");
                false
            }
        }
    });

    join_all(updates)
        .await
        .into_iter()
        .fold(ScheduleReport::default(), |mut report, pushed| {
            if pushed {
                report.pushed += 1;
            } else {
                report.dropped += 1;
            }
            report
        })
}
