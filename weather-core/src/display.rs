//! Plain-text rendering of the weather panel and the search history.

use chrono::{DateTime, Local};
use std::fmt::Write as _;

use crate::{SearchHistory, WeatherPanel, WeatherRecord};

pub const EMPTY_PROMPT: &str = "Please enter a city to search for.";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please try again.";

/// Round half up toward positive infinity, so -2.5 shows as -2.
pub fn round_temp(celsius: f64) -> i64 {
    let floor = celsius.floor();
    let rounded = if celsius - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// US-style date-time, e.g. `10/19/2026, 3:04:05 PM`.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn render_panel(panel: WeatherPanel<'_>, now: DateTime<Local>) -> String {
    match panel {
        WeatherPanel::Empty => EMPTY_PROMPT.to_string(),
        WeatherPanel::NotFound => NOT_FOUND_MESSAGE.to_string(),
        WeatherPanel::Found(record) => render_record(record, now),
    }
}

fn render_record(record: &WeatherRecord, now: DateTime<Local>) -> String {
    format!(
        "{} °C\n\
         H: {} °C  L: {} °C\n\
         {}, {}  {}\n\
         Humidity: {}%  {}",
        round_temp(record.temperature_c),
        round_temp(record.temperature_max_c),
        round_temp(record.temperature_min_c),
        record.city_name,
        record.country_code,
        format_timestamp(&now),
        record.humidity_pct,
        record.condition_summary,
    )
}

/// One numbered line per entry, most recent first. Empty history renders as
/// an empty string.
pub fn render_history(history: &SearchHistory) -> String {
    let mut out = String::new();
    for (idx, entry) in history.entries().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {}  {}",
            idx + 1,
            entry.label(),
            format_timestamp(&entry.last_searched_at)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, h, m, s).unwrap()
    }

    #[test]
    fn rounds_like_a_display_would() {
        assert_eq!(round_temp(18.4), 18);
        assert_eq!(round_temp(18.5), 19);
        assert_eq!(round_temp(-2.5), -2);
        assert_eq!(round_temp(-2.6), -3);
        assert_eq!(round_temp(0.0), 0);
        assert_eq!(round_temp(0.49999999999999994), 0);
        assert_eq!(round_temp(-0.5), 0);
    }

    #[test]
    fn formats_us_timestamp() {
        assert_eq!(format_timestamp(&at(15, 4, 5)), "10/19/2026, 3:04:05 PM");
        assert_eq!(format_timestamp(&at(0, 30, 0)), "10/19/2026, 12:30:00 AM");
    }

    #[test]
    fn empty_and_not_found_panels() {
        assert_eq!(render_panel(WeatherPanel::Empty, at(9, 0, 0)), EMPTY_PROMPT);
        assert_eq!(render_panel(WeatherPanel::NotFound, at(9, 0, 0)), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn found_panel_shows_rounded_values() {
        let record = WeatherRecord {
            city_name: "Paris".into(),
            country_code: "FR".into(),
            temperature_c: 18.4,
            temperature_max_c: 19.6,
            temperature_min_c: 16.2,
            humidity_pct: 63,
            condition_summary: "Clear".into(),
        };

        let text = render_panel(WeatherPanel::Found(&record), at(9, 15, 0));

        assert!(text.starts_with("18 °C\n"));
        assert!(text.contains("H: 20 °C  L: 16 °C"));
        assert!(text.contains("Paris, FR  10/19/2026, 9:15:00 AM"));
        assert!(text.contains("Humidity: 63%  Clear"));
    }

    #[test]
    fn history_lines_are_numbered_newest_first() {
        let mut history = SearchHistory::new();
        assert_eq!(render_history(&history), "");

        history.record_search("Paris", "FR", at(9, 0, 0));
        history.record_search("Tokyo", "JP", at(10, 0, 0));

        let text = render_history(&history);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                " 1. Tokyo, JP  10/19/2026, 10:00:00 AM",
                " 2. Paris, FR  10/19/2026, 9:00:00 AM",
            ]
        );
    }
}
