use chrono::{DateTime, Local};

use crate::error::LookupError;

/// Current conditions for a single city, as returned by the lookup service.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city_name: String,
    pub country_code: String,
    pub temperature_c: f64,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub humidity_pct: u8,
    pub condition_summary: String,
}

/// Result of one lookup, classified at the service boundary.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(WeatherRecord),
    NotFound,
    TransportError(LookupError),
}

/// What the view-model remembers about the last completed search.
///
/// "No result" (initial state, or the last search failed) is `None` on the
/// holder side.
#[derive(Debug, Clone, PartialEq)]
pub enum LastResult {
    Found(WeatherRecord),
    NotFound,
}

/// One previously searched city. `city_name` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub city_name: String,
    pub country_code: String,
    pub last_searched_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(city_name: String, country_code: String, at: DateTime<Local>) -> Self {
        Self {
            city_name,
            country_code,
            last_searched_at: at,
        }
    }

    /// `City, CC` as shown in the history list.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city_name, self.country_code)
    }
}
