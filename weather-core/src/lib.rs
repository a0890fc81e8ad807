//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather lookup abstraction and its OpenWeather client
//! - Search history with most-recently-used ordering
//! - The search view-model and plain-text rendering of its state
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod view_model;

pub use config::{Config, ProviderConfig};
pub use error::LookupError;
pub use history::SearchHistory;
pub use model::{HistoryEntry, LastResult, LookupOutcome, WeatherRecord};
pub use provider::{WeatherLookup, lookup_from_config, openweather::OpenWeatherClient};
pub use view_model::{WeatherPanel, WeatherViewModel};
