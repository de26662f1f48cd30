use crate::{
    Config, WeatherPayload, WeatherRequest, error::WeatherError,
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Fetch current conditions. Only payloads with `cod == 200` are returned.
    async fn current(&self, request: &WeatherRequest) -> Result<WeatherPayload, WeatherError>;
}

/// Construct the weather client described by `config`, honouring an endpoint override.
pub fn client_from_config(config: &Config) -> Box<dyn WeatherClient> {
    match config.endpoint.as_deref() {
        Some(base_url) => Box::new(OpenWeatherClient::with_base_url(base_url)),
        None => Box::new(OpenWeatherClient::new()),
    }
}
