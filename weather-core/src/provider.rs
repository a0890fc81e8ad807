use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, LookupOutcome, provider::openweather::OpenWeatherClient};

pub mod openweather;

/// Anything that can answer "what is the weather in this city right now".
///
/// Implementations classify every reply into a [`LookupOutcome`] and never
/// return raw service payloads.
#[async_trait]
pub trait WeatherLookup: Send + Sync + Debug {
    async fn lookup(&self, city: &str) -> LookupOutcome;
}

/// Construct the OpenWeather client from config (and the environment override).
pub fn lookup_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    build_client(config.resolve_api_key(), config.base_url())
}

fn build_client(
    api_key: Option<String>,
    base_url: Option<&str>,
) -> anyhow::Result<OpenWeatherClient> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `weather configure` and enter your API key, \
             or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let client = match base_url {
        Some(url) => OpenWeatherClient::new(api_key).with_base_url(url),
        None => OpenWeatherClient::new(api_key),
    };

    Ok(client)
}
