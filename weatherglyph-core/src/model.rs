use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FormatError;

/// One current-weather lookup: where, and with whose API key.
#[derive(Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: String,
    pub api_key: String,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { city: city.into(), api_key: api_key.into() }
    }
}

// Keeps API keys out of logs.
impl fmt::Debug for WeatherRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherRequest")
            .field("city", &self.city)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Current weather as returned by the OpenWeatherMap `weather` endpoint.
///
/// Only the fields the stream needs are kept; everything else in the
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(deserialize_with = "deserialize_cod")]
    pub cod: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in Kelvin.
    pub temp: f64,
}

/// One entry of the payload's `weather` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Icon code such as `"01d"`; the suffix is the day/night variant.
    pub icon: String,
    /// Phenomenon id such as `800`.
    pub id: i64,
}

impl Condition {
    pub fn new(icon: impl Into<String>, id: i64) -> Self {
        Self { icon: icon.into(), id }
    }
}

/// OpenWeatherMap sends `cod` as a number on success and as a string
/// (`"404"`) on errors.
pub(crate) fn deserialize_cod<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cod {
        Number(i64),
        Text(String),
    }

    match Cod::deserialize(deserializer)? {
        Cod::Number(n) => Ok(n),
        Cod::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid cod '{s}'"))),
    }
}

/// Display unit selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Letter shown after the degree sign.
    pub fn letter(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for TemperatureUnit {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(TemperatureUnit::Celsius),
            "F" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(FormatError::InvalidUnit(value.to_string())),
        }
    }
}

impl TryFrom<String> for TemperatureUnit {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemperatureUnit> for String {
    fn from(unit: TemperatureUnit) -> Self {
        unit.letter().to_string()
    }
}

/// Final stream value, e.g. `"\u{e004} 80°F"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayString(String);

impl DisplayString {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DisplayString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DisplayString> for String {
    fn from(value: DisplayString) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_debug_hides_api_key() {
        let request = WeatherRequest::new("Minneapolis", "secret");
        let debug = format!("{request:?}");
        assert!(debug.contains("Minneapolis"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn payload_ignores_unknown_fields() {
        let json = r#"{
            "coord": {"lon": -93.26, "lat": 44.98},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 300.0, "humidity": 40},
            "name": "Minneapolis",
            "cod": 200
        }"#;

        let payload: WeatherPayload = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(payload.cod, 200);
        assert_eq!(payload.main.temp, 300.0);
        assert_eq!(payload.weather, vec![Condition::new("01d", 800)]);
    }

    #[test]
    fn cod_accepts_numeric_string() {
        let json = r#"{"cod": "404", "main": {"temp": 0.0}}"#;
        let payload: WeatherPayload = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(payload.cod, 404);
        assert!(payload.weather.is_empty());
    }

    #[test]
    fn cod_rejects_non_numeric_string() {
        let json = r#"{"cod": "nope", "main": {"temp": 0.0}, "weather": []}"#;
        let err = serde_json::from_str::<WeatherPayload>(json).unwrap_err();
        assert!(err.to_string().contains("invalid cod 'nope'"));
    }

    #[test]
    fn unit_parses_letters() {
        assert_eq!("C".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert_eq!(" f ".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = "K".parse::<TemperatureUnit>().unwrap_err();
        assert_eq!(err, FormatError::InvalidUnit("K".to_string()));
        assert!(err.to_string().contains("Supported units: C, F"));
    }

    #[test]
    fn unit_serializes_as_letter() {
        let json = serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap();
        assert_eq!(json, "\"F\"");

        let unit: TemperatureUnit = serde_json::from_str("\"c\"").unwrap();
        assert_eq!(unit, TemperatureUnit::Celsius);

        assert!(serde_json::from_str::<TemperatureUnit>("\"X\"").is_err());
    }
}
