use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{config::Config, model::WeatherReport, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Everything that can go wrong between issuing the request and holding a
/// complete [`WeatherReport`].
///
/// All three cases surface to the user as the same "city not found" style
/// message; the split exists for logging and tests. A malformed body is an
/// error like any other, never a panic.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather service returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("failed to parse weather service response: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("weather service response is missing field: {0}")]
    MissingField(&'static str),
}

/// Source of current weather observations.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(
        api_key.to_owned(),
        config.endpoint().to_owned(),
    )))
}
