use chrono::{DateTime, Local};
use tracing::debug;

use crate::model::HistoryEntry;

/// Most-recently-searched cities, newest first.
///
/// City names are unique within the history. Entries are only ever added or
/// promoted through [`SearchHistory::record_search`] and removed through
/// [`SearchHistory::remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<HistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, city_name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.city_name == city_name)
    }

    /// Upsert-and-promote.
    ///
    /// A known city (exact, case-sensitive match) moves to the front with its
    /// timestamp set to `now`; its country code is left as first recorded.
    /// An unknown city is inserted at the front.
    pub fn record_search(&mut self, city_name: &str, country_code: &str, now: DateTime<Local>) {
        match self.position(city_name) {
            Some(idx) => {
                let mut entry = self.entries.remove(idx);
                entry.last_searched_at = now;
                self.entries.insert(0, entry);
                debug!(city = city_name, from = idx, "promoted history entry");
            }
            None => {
                self.entries.insert(
                    0,
                    HistoryEntry::new(city_name.to_string(), country_code.to_string(), now),
                );
                debug!(city = city_name, len = self.entries.len(), "added history entry");
            }
        }
    }

    /// Remove every entry named `city_name`. Unknown names are a no-op.
    pub fn remove(&mut self, city_name: &str) {
        let before = self.entries.len();
        self.entries.retain(|e| e.city_name != city_name);

        if self.entries.len() != before {
            debug!(city = city_name, "removed history entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    fn names(history: &SearchHistory) -> Vec<&str> {
        history.entries().iter().map(|e| e.city_name.as_str()).collect()
    }

    fn abc() -> SearchHistory {
        let mut h = SearchHistory::new();
        h.record_search("C", "CC", t(1));
        h.record_search("B", "BB", t(2));
        h.record_search("A", "AA", t(3));
        h
    }

    #[test]
    fn new_city_is_prepended() {
        let mut h = abc();
        h.record_search("D", "DD", t(10));

        assert_eq!(names(&h), ["D", "A", "B", "C"]);
        assert_eq!(h.get(0).unwrap().country_code, "DD");
        assert_eq!(h.get(0).unwrap().last_searched_at, t(10));
        assert_eq!(h.get(1).unwrap().last_searched_at, t(3));
    }

    #[test]
    fn known_city_is_promoted_and_refreshed() {
        let mut h = abc();
        h.record_search("B", "BB", t(10));

        assert_eq!(names(&h), ["B", "A", "C"]);
        assert_eq!(h.get(0).unwrap().last_searched_at, t(10));
        assert_eq!(h.get(1).unwrap().last_searched_at, t(3));
        assert_eq!(h.get(2).unwrap().last_searched_at, t(1));
    }

    #[test]
    fn repeat_search_of_front_entry_keeps_length() {
        let mut h = abc();
        h.record_search("A", "AA", t(10));
        h.record_search("A", "AA", t(11));

        assert_eq!(names(&h), ["A", "B", "C"]);
        assert_eq!(h.get(0).unwrap().last_searched_at, t(11));
    }

    #[test]
    fn promotion_keeps_first_recorded_country() {
        let mut h = abc();
        h.record_search("C", "XX", t(10));

        assert_eq!(h.get(0).unwrap().country_code, "CC");
    }

    #[test]
    fn city_match_is_case_sensitive() {
        let mut h = abc();
        h.record_search("a", "AA", t(10));

        assert_eq!(names(&h), ["a", "A", "B", "C"]);
    }

    #[test]
    fn names_stay_unique_across_many_searches() {
        let mut h = SearchHistory::new();
        let cities = ["Paris", "Tokyo", "Paris", "Lima", "Tokyo", "Tokyo", "Oslo", "Paris"];
        for (i, city) in cities.iter().enumerate() {
            h.record_search(city, "XX", t(i as i64));
        }

        let mut seen = names(&h);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), h.len());
        assert_eq!(names(&h), ["Paris", "Oslo", "Tokyo", "Lima"]);
    }

    #[test]
    fn remove_drops_only_the_named_entry() {
        let mut h = abc();
        let expected: Vec<_> = h
            .entries()
            .iter()
            .filter(|e| e.city_name != "B")
            .cloned()
            .collect();

        h.remove("B");

        assert_eq!(h.entries(), expected.as_slice());
    }

    #[test]
    fn remove_unknown_city_is_noop() {
        let mut h = abc();
        let before = h.clone();

        h.remove("Atlantis");
        h.remove("a");

        assert_eq!(h, before);
    }
}
