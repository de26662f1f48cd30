use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::WeatherError,
    model::{WeatherPayload, WeatherRequest, deserialize_cod},
};

use super::WeatherClient;

pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";

/// OpenWeatherMap "current weather" client.
///
/// No `units` parameter is sent, so temperatures come back in Kelvin.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    base_url: String,
}

impl Default for OpenWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenWeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn current_url(&self) -> String {
        format!("{}{}", self.base_url, CURRENT_PATH)
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip_all, fields(city = %request.city), level = "debug")]
    async fn current(&self, request: &WeatherRequest) -> Result<WeatherPayload, WeatherError> {
        let url = self.current_url();

        let res = self
            .http
            .get(&url)
            .query(&[("q", request.city.as_str()), ("appid", request.api_key.as_str())])
            .send()
            .await
            .map_err(|source| request_error(&url, source))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| request_error(&url, source))?;

        let payload = parse_current(&url, status, &body)?;
        debug!(temp = payload.main.temp, conditions = payload.weather.len(), "received weather");

        Ok(payload)
    }
}

// The request URL carries `appid`, so it never makes it into the error.
fn request_error(endpoint: &str, source: reqwest::Error) -> WeatherError {
    WeatherError::Request { endpoint: endpoint.to_string(), source: source.without_url() }
}

/// Just enough of the response to tell success from an API error.
#[derive(Debug, Deserialize)]
struct OwEnvelope {
    #[serde(deserialize_with = "deserialize_cod")]
    cod: i64,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

fn parse_current(endpoint: &str, status: StatusCode, body: &str) -> Result<WeatherPayload, WeatherError> {
    let envelope: OwEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(WeatherError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }
        Err(source) => {
            return Err(WeatherError::Malformed { endpoint: endpoint.to_string(), source });
        }
    };

    if envelope.cod != 200 {
        let message = match envelope.message {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "no message".to_string(),
        };
        return Err(WeatherError::Api { cod: envelope.cod, message });
    }

    serde_json::from_str(body)
        .map_err(|source| WeatherError::Malformed { endpoint: endpoint.to_string(), source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
