//! Normalization of raw FFA table rows into typed [`PerformancePoint`]s.
//!
//! The source duplicates date/performance/wind parsing with slight
//! variations across its call sites; this module is the single consolidated
//! implementation. All three parsers are pure, total functions: malformed
//! input yields `None`, never an error.

pub mod date;
pub mod perf;
pub mod wind;

pub use date::resolve_date;
pub use perf::parse_performance;
pub use wind::parse_wind;

use crate::types::{PerformancePoint, RawResultEntry};

/// Lowercases and folds French accented letters to their ASCII base so that
/// lexicon lookups ("fév" vs "fev", "Hauteur" vs "hauteur") are stable.
pub(crate) fn fold_french(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '\u{a0}' => ' ',
            other => other,
        })
        .collect()
}

/// Builds the normalized point for one raw table row.
///
/// Every row yields exactly one point, except rows where both the
/// performance text and the event label are blank: those carry no
/// information at all and are dropped as noise.
pub fn normalize_entry(
    event_label: &str,
    entry: &RawResultEntry,
    year_hint: Option<i32>,
    current_year: i32,
) -> Option<PerformancePoint> {
    let raw_value = entry.performance.trim();
    if raw_value.is_empty() && event_label.trim().is_empty() {
        return None;
    }

    let timestamp = resolve_date(&entry.date, year_hint, current_year);
    let value = parse_performance(&entry.performance);
    let wind = entry.wind.as_deref().and_then(parse_wind);
    let points = entry
        .points
        .as_deref()
        .and_then(|p| p.trim().parse::<u32>().ok());

    Some(PerformancePoint {
        event: event_label.to_string(),
        raw_date: entry.date.clone(),
        timestamp,
        year: year_hint,
        value,
        raw_value: raw_value.to_string(),
        wind,
        points,
        venue: entry.venue.clone(),
        round: entry.round.clone(),
        rank: entry.rank.clone(),
        level: entry.level.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn entry(date: &str, performance: &str, wind: Option<&str>) -> RawResultEntry {
        RawResultEntry {
            date: date.to_string(),
            performance: performance.to_string(),
            wind: wind.map(|w| w.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_becomes_point() {
        let point = normalize_entry("100m", &entry("12 mars", "11\"45", Some("+1.5")), Some(2024), 2025)
            .unwrap();
        assert_eq!(point.event, "100m");
        assert_eq!(point.timestamp.unwrap().year(), 2024);
        assert!((point.value.unwrap() - 11.45).abs() < 1e-9);
        assert!((point.wind.unwrap() - 1.5).abs() < 1e-9);
        assert_eq!(point.raw_value, "11\"45");
        assert_eq!(point.year, Some(2024));
    }

    #[test]
    fn test_unparseable_fields_degrade_to_none() {
        let point = normalize_entry("400m", &entry("invalid", "DSQ", Some("")), Some(2024), 2025)
            .unwrap();
        assert!(point.timestamp.is_none());
        assert!(point.value.is_none());
        assert!(point.wind.is_none());
        assert_eq!(point.raw_value, "DSQ");
    }

    #[test]
    fn test_blank_value_and_blank_label_is_noise() {
        assert!(normalize_entry("", &entry("12 mars", "  ", None), Some(2024), 2025).is_none());
        // A label alone keeps the row alive.
        assert!(normalize_entry("100m", &entry("12 mars", "", None), Some(2024), 2025).is_some());
    }

    #[test]
    fn test_points_column_parsed_when_numeric() {
        let mut raw = entry("12 mars", "11\"45", None);
        raw.points = Some("981".to_string());
        let point = normalize_entry("100m", &raw, Some(2024), 2025).unwrap();
        assert_eq!(point.points, Some(981));

        raw.points = Some("-".to_string());
        let point = normalize_entry("100m", &raw, Some(2024), 2025).unwrap();
        assert_eq!(point.points, None);
    }

    #[test]
    fn test_fold_french() {
        assert_eq!(fold_french("Février"), "fevrier");
        assert_eq!(fold_french("AOÛT"), "aout");
        assert_eq!(fold_french("Hauteur"), "hauteur");
    }
}
