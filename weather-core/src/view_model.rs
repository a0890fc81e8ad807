//! Search controller: query text, last result and search history.
//!
//! [`WeatherViewModel::search`] performs one lookup and folds the outcome into
//! state. The `apply_*` functions are the same transitions without I/O, so a
//! front end that runs lookups itself (or a test) can drive the state directly.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::{
    LookupError, LookupOutcome, SearchHistory, WeatherLookup, WeatherRecord, model::LastResult,
};

/// Which of the three mutually exclusive weather panels to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeatherPanel<'a> {
    /// Nothing searched yet, or the last search failed.
    Empty,
    Found(&'a WeatherRecord),
    NotFound,
}

#[derive(Debug)]
pub struct WeatherViewModel<L> {
    lookup: L,
    query: String,
    last_result: Option<LastResult>,
    history: SearchHistory,
}

impl<L: WeatherLookup> WeatherViewModel<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            query: String::new(),
            last_result: None,
            history: SearchHistory::new(),
        }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Search `city_override` if given, else the current query text.
    ///
    /// The city is forwarded as-is (an empty string included). Failures are
    /// logged and reset the panel to [`WeatherPanel::Empty`]; they are never
    /// returned.
    pub async fn search(&mut self, city_override: Option<&str>) {
        let city = city_override.unwrap_or(self.query.as_str()).to_owned();
        let outcome = self.lookup.lookup(&city).await;
        self.apply_outcome(outcome, Local::now());
    }
}

impl<L> WeatherViewModel<L> {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn last_result(&self) -> Option<&LastResult> {
        self.last_result.as_ref()
    }

    pub fn panel(&self) -> WeatherPanel<'_> {
        match &self.last_result {
            None => WeatherPanel::Empty,
            Some(LastResult::Found(record)) => WeatherPanel::Found(record),
            Some(LastResult::NotFound) => WeatherPanel::NotFound,
        }
    }

    /// Fold a completed lookup into state. Whichever outcome is applied last
    /// wins.
    pub fn apply_outcome(&mut self, outcome: LookupOutcome, now: DateTime<Local>) {
        match outcome {
            LookupOutcome::Found(record) => self.apply_success(record, now),
            LookupOutcome::NotFound => self.apply_not_found(),
            LookupOutcome::TransportError(err) => self.apply_failure(&err),
        }
    }

    pub fn apply_success(&mut self, record: WeatherRecord, now: DateTime<Local>) {
        info!(city = %record.city_name, country = %record.country_code, "weather found");
        self.history
            .record_search(&record.city_name, &record.country_code, now);
        self.last_result = Some(LastResult::Found(record));
    }

    pub fn apply_not_found(&mut self) {
        info!("city not found");
        self.last_result = Some(LastResult::NotFound);
    }

    pub fn apply_failure(&mut self, err: &LookupError) {
        warn!(error = %err, "error fetching weather data");
        self.last_result = None;
    }

    /// Remove a city from the history; unknown names are ignored. The query
    /// and the last result are left alone.
    pub fn delete_history_entry(&mut self, city_name: &str) {
        self.history.remove(city_name);
    }
}
