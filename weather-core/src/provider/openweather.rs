use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::{LookupError, LookupOutcome, WeatherRecord};

use super::WeatherLookup;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Client for OpenWeather's "current weather" endpoint, metric units.
#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_current(&self, city: &str) -> Result<LookupOutcome, LookupError> {
        debug!(city, endpoint = %self.endpoint(), "requesting current weather");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[("q", city), ("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        parse_current(status, &body)
    }
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn lookup(&self, city: &str) -> LookupOutcome {
        match self.fetch_current(city).await {
            Ok(outcome) => outcome,
            Err(err) => LookupOutcome::TransportError(err),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition_summary = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .unwrap_or_else(|| "Unknown".to_string());

        WeatherRecord {
            city_name: parsed.name,
            country_code: parsed.sys.country,
            temperature_c: parsed.main.temp,
            temperature_max_c: parsed.main.temp_max,
            temperature_min_c: parsed.main.temp_min,
            humidity_pct: parsed.main.humidity,
            condition_summary,
        }
    }
}

/// Classify a response body. `cod` decides not-found before the HTTP status
/// does, because OpenWeather answers unknown cities with 404 plus a JSON body.
fn parse_current(status: u16, body: &str) -> Result<LookupOutcome, LookupError> {
    let is_success = (200..300).contains(&status);

    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) if !is_success => return Err(LookupError::unexpected(status, body)),
        Err(e) => return Err(e.into()),
    };

    if value.get("cod").is_some_and(is_not_found_code) {
        return Ok(LookupOutcome::NotFound);
    }

    match serde_json::from_value::<OwCurrentResponse>(value) {
        Ok(parsed) => Ok(LookupOutcome::Found(parsed.into())),
        Err(_) if !is_success => Err(LookupError::unexpected(status, body)),
        Err(e) => Err(e.into()),
    }
}

fn is_not_found_code(cod: &Value) -> bool {
    match cod {
        Value::String(s) => s == "404",
        Value::Number(n) => n.as_u64() == Some(404),
        _ => false,
    }
}
