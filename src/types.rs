use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw results payload as produced by the upstream fetcher:
/// season year (as written in the source) → event label → table rows.
pub type ResultsByYear = BTreeMap<String, EventEntries>;

/// One season's rows grouped by event label.
pub type EventEntries = BTreeMap<String, Vec<RawResultEntry>>;

/// One scraped FFA results-table row, exactly as extracted upstream.
///
/// Field names follow the source table cells (`vent`, `tour`, `place`,
/// `niveau`, `lieu`); everything except `date`, `performance` and the wind
/// column is opaque metadata carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultEntry {
    /// Free-text date: "12 mars", "03/06/2024", "03/06/24", or a generic
    /// parseable date string.
    #[serde(default)]
    pub date: String,
    /// Free-text performance: a time notation, a distance/mark, or a
    /// non-numeric label such as "DNF" or "DSQ".
    #[serde(default)]
    pub performance: String,
    /// Free-text wind gauge reading. The source uses several field names for
    /// this column depending on the page.
    #[serde(
        rename = "vent",
        alias = "anemometre",
        alias = "anemo",
        alias = "wind",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub wind: Option<String>,
    /// Competition round ("Finale", "Série 2", …).
    #[serde(rename = "tour", default, skip_serializing_if = "Option::is_none")]
    pub round: Option<String>,
    /// Finishing rank within the round.
    #[serde(rename = "place", default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    /// Meet level ("Départemental", "National", …).
    #[serde(rename = "niveau", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// FFA scoring-table points for the performance, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<String>,
    /// Venue / city of the meet.
    #[serde(rename = "lieu", default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

/// A normalized competition appearance: the typed, comparable form of one
/// [`RawResultEntry`].
///
/// Parsing failures degrade to `None` fields rather than dropping the point;
/// `raw_value` is always retained so labels like "DNF" survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Event label, carried through unchanged.
    pub event: String,
    /// Date text as scraped.
    pub raw_date: String,
    /// Resolved absolute instant. Day-only sources resolve to noon UTC so
    /// date comparisons are stable across caller timezones.
    pub timestamp: Option<DateTime<Utc>>,
    /// Season year the entry was scraped under.
    pub year: Option<i32>,
    /// Performance as a number: seconds for times, native unit for marks.
    pub value: Option<f64>,
    /// Performance text as scraped, always present.
    pub raw_value: String,
    /// Signed wind reading in m/s.
    pub wind: Option<f64>,
    /// FFA scoring-table points, when published and numeric.
    pub points: Option<u32>,
    pub venue: Option<String>,
    pub round: Option<String>,
    pub rank: Option<String>,
    pub level: Option<String>,
}

/// Comparison direction for an event.
///
/// Times (sprints, middle distance, …) rank lower-is-better; marks (jumps
/// and throws) rank higher-is-better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Timed,
    Mark,
}
