//! Athlete profile assembly: merges raw results scraped across seasons into
//! per-event aggregates, record/season-best maps, and a charting timeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{aggregate_event, infer_event_kind, EventAggregate};
use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::normalize::normalize_entry;
use crate::types::{PerformancePoint, ResultsByYear};

/// Document-store map keys cannot contain dots; the original label is kept
/// separately for display.
pub fn sanitize_key(label: &str) -> String {
    label.replace('.', "_")
}

/// One event's points merged across seasons, keyed by sanitized label.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEvent {
    /// Original (unsanitized) event label, first spelling seen.
    pub label: String,
    pub points: Vec<PerformancePoint>,
}

/// Per-event record / season-best summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBest {
    pub event: String,
    pub record: Option<String>,
    pub best_season: Option<String>,
}

/// One appearance on the cross-event charting timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: DateTime<Utc>,
    pub raw_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub discipline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub raw_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    pub source: String,
}

/// Frontend-ready view of an athlete's scraped results.
///
/// Maps are keyed by sanitized event label and use ordered maps throughout,
/// so serializing the profile twice from the same input is byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Season year the `season_bests` selections refer to.
    pub current_year: i32,
    /// Raw string of the best legal performance per event.
    pub records: BTreeMap<String, String>,
    /// Best published FFA scoring-table points per event.
    pub record_points: BTreeMap<String, u32>,
    /// Raw string of the current-season selection per event.
    pub season_bests: BTreeMap<String, String>,
    /// Summary rows, one per event with at least one appearance.
    pub performances: Vec<EventBest>,
    /// Chronologically ascending, cross-event timeline for charting.
    pub timeline: Vec<TimelinePoint>,
}

/// Reads a grouped-results JSON document (year → event label → rows) from
/// disk, the shape the upstream fetcher persists.
pub fn load_results(path: &Path) -> Result<ResultsByYear> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Merges per-year, per-event rows into per-event point lists. Rows keep
/// their season year as the year hint for date resolution; noise rows are
/// dropped by [`normalize_entry`].
pub fn merge_results(results: &ResultsByYear, current_year: i32) -> BTreeMap<String, MergedEvent> {
    let mut merged: BTreeMap<String, MergedEvent> = BTreeMap::new();

    for (year_label, events) in results {
        let year_hint = year_label.trim().parse::<i32>().ok();
        for (label, entries) in events {
            let key = sanitize_key(label);
            for entry in entries {
                if let Some(point) = normalize_entry(label, entry, year_hint, current_year) {
                    merged
                        .entry(key.clone())
                        .or_insert_with(|| MergedEvent {
                            label: label.clone(),
                            points: Vec::new(),
                        })
                        .points
                        .push(point);
                }
            }
        }
    }

    merged
}

/// Aggregates every merged event, inferring each event's comparison
/// direction from its label (extended by configuration).
pub fn aggregate_all(
    merged: &BTreeMap<String, MergedEvent>,
    config: &NormalizerConfig,
    current_year: i32,
) -> BTreeMap<String, EventAggregate> {
    merged
        .iter()
        .map(|(key, event)| {
            let kind = infer_event_kind(&event.label, &config.extra_mark_events);
            debug!(event = %event.label, ?kind, points = event.points.len(), "aggregating event");
            (
                key.clone(),
                aggregate_event(&event.label, kind, event.points.clone(), current_year),
            )
        })
        .collect()
}

/// Best published FFA points for one event. Rows without a parseable points
/// cell never beat rows that have one.
fn best_points(points: &[PerformancePoint]) -> Option<u32> {
    points.iter().filter_map(|p| p.points).max()
}

/// Ascending cross-event timeline. Undated rows and rows with a blank
/// performance string or blank label stay out of the date-ordered view;
/// they remain available in the per-event aggregates.
pub fn build_timeline(aggregates: &BTreeMap<String, EventAggregate>) -> Vec<TimelinePoint> {
    let mut timeline: Vec<TimelinePoint> = aggregates
        .values()
        .flat_map(|agg| agg.all_points.iter())
        .filter(|p| !p.raw_value.trim().is_empty() && !p.event.trim().is_empty())
        .filter_map(|p| {
            let date = p.timestamp?;
            Some(TimelinePoint {
                date,
                raw_date: p.raw_date.clone(),
                year: p.year,
                discipline: p.event.clone(),
                value: p.value,
                raw_value: p.raw_value.clone(),
                wind: p.wind,
                venue: p.venue.clone(),
                level: p.level.clone(),
                round: p.round.clone(),
                rank: p.rank.clone(),
                points: p.points,
                source: "ffa".to_string(),
            })
        })
        .collect();

    timeline.sort_by(|a, b| a.date.cmp(&b.date));
    timeline
}

/// Builds the full athlete profile from grouped raw results.
///
/// Pure in its inputs: `current_year` is the caller's notion of "this
/// season", never read from the clock here.
pub fn build_profile(
    results: &ResultsByYear,
    config: &NormalizerConfig,
    current_year: i32,
) -> AthleteProfile {
    let merged = merge_results(results, current_year);
    let aggregates = aggregate_all(&merged, config, current_year);

    let mut records = BTreeMap::new();
    let mut record_points = BTreeMap::new();
    let mut season_bests = BTreeMap::new();
    let mut performances = Vec::new();

    for (key, agg) in &aggregates {
        if let Some(best) = &agg.best_legal {
            records.insert(key.clone(), best.raw_value.clone());
        }
        if let Some(points) = best_points(&agg.all_points) {
            record_points.insert(key.clone(), points);
        }
        if let Some(season) = &agg.best_current_season {
            season_bests.insert(key.clone(), season.raw_value.clone());
        }
        if !agg.all_points.is_empty() {
            performances.push(EventBest {
                event: agg.event.clone(),
                record: agg.best_legal.as_ref().map(|p| p.raw_value.clone()),
                best_season: agg.best_current_season.as_ref().map(|p| p.raw_value.clone()),
            });
        }
    }

    let timeline = build_timeline(&aggregates);
    info!(
        events = aggregates.len(),
        timeline_points = timeline.len(),
        current_year,
        "profile assembled"
    );

    AthleteProfile {
        current_year,
        records,
        record_points,
        season_bests,
        performances,
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawResultEntry;
    use serde_json::json;

    fn sample_results() -> ResultsByYear {
        serde_json::from_value(json!({
            "2024": {
                "100m": [
                    { "date": "12 mars", "performance": "11\"45", "vent": "+1.5", "points": "812", "lieu": "Lyon" },
                    { "date": "03 juin", "performance": "11\"20", "vent": "+2.3", "points": "870", "lieu": "Paris" }
                ],
                "Longueur": [
                    { "date": "20 avril", "performance": "6,43", "vent": "+1.0" }
                ]
            },
            "2023": {
                "100m": [
                    { "date": "10 juil", "performance": "11\"60", "vent": "" }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("4x100m 1.2"), "4x100m 1_2");
        assert_eq!(sanitize_key("100m"), "100m");
    }

    #[test]
    fn test_merge_groups_across_years() {
        let merged = merge_results(&sample_results(), 2024);
        assert_eq!(merged.len(), 2);
        let sprint = &merged["100m"];
        assert_eq!(sprint.label, "100m");
        assert_eq!(sprint.points.len(), 3);
        let years: Vec<Option<i32>> = sprint.points.iter().map(|p| p.year).collect();
        assert!(years.contains(&Some(2023)));
        assert!(years.contains(&Some(2024)));
    }

    #[test]
    fn test_profile_records_and_season_bests() {
        let profile = build_profile(&sample_results(), &NormalizerConfig::default(), 2024);

        // June 11.20 is wind-illegal (+2.3); the March 11.45 is the record
        // and the 2024 season best.
        assert_eq!(profile.records["100m"], "11\"45");
        assert_eq!(profile.season_bests["100m"], "11\"45");
        assert_eq!(profile.record_points["100m"], 870);
        assert_eq!(profile.records["Longueur"], "6,43");

        let sprint_row = profile
            .performances
            .iter()
            .find(|p| p.event == "100m")
            .unwrap();
        assert_eq!(sprint_row.record.as_deref(), Some("11\"45"));
        assert_eq!(sprint_row.best_season.as_deref(), Some("11\"45"));
    }

    #[test]
    fn test_timeline_is_ascending_and_skips_blank_rows() {
        let mut results = sample_results();
        results.get_mut("2024").unwrap().insert(
            "400m".to_string(),
            vec![RawResultEntry {
                date: "invalid".to_string(),
                performance: "DSQ".to_string(),
                ..Default::default()
            }],
        );

        let profile = build_profile(&results, &NormalizerConfig::default(), 2024);
        let dates: Vec<_> = profile.timeline.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);

        // The undated DSQ row stays out of the date-ordered timeline but
        // still exists as a retained point.
        assert!(profile.timeline.iter().all(|p| p.discipline != "400m"));
        let merged = merge_results(&results, 2024);
        assert_eq!(merged["400m"].points.len(), 1);
        assert_eq!(merged["400m"].points[0].raw_value, "DSQ");
    }

    #[test]
    fn test_profile_serialization_is_deterministic() {
        let results = sample_results();
        let first = build_profile(&results, &NormalizerConfig::default(), 2024);
        let second = build_profile(&results, &NormalizerConfig::default(), 2024);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }
}
