//! Per-event aggregation: wind-legality partition, record selection, and
//! current-season selection over normalized points.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::fold_french;
use crate::types::{EventKind, PerformancePoint};

/// Tail-wind assistance above this value disqualifies a sprint/jump result
/// for record purposes. An absent reading is treated as legal.
pub const WIND_LEGAL_LIMIT_MS: f64 = 2.0;

/// Built-in label markers for disciplines ranked higher-is-better.
const MARK_EVENT_MARKERS: &[&str] = &[
    "longueur",
    "hauteur",
    "triple",
    "perche",
    "pentabond",
    "poids",
    "javelot",
    "disque",
    "marteau",
    "lancer",
    "saut",
];

/// All per-event derived views for one event label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAggregate {
    /// Original event label.
    pub event: String,
    /// Comparison direction used for the selections below.
    pub kind: EventKind,
    /// Every retained point, most recent first; an unresolved timestamp
    /// sorts as the oldest possible value.
    pub all_points: Vec<PerformancePoint>,
    /// Subset of `all_points` with wind absent or within the legal limit.
    pub legal_points: Vec<PerformancePoint>,
    /// Record: numerically best legal point, ties broken by recency.
    pub best_legal: Option<PerformancePoint>,
    /// Most recent valued point of the requested season, legal preferred.
    pub best_current_season: Option<PerformancePoint>,
}

/// Whether a point qualifies for record purposes.
pub fn is_wind_legal(point: &PerformancePoint) -> bool {
    point.wind.map_or(true, |w| w <= WIND_LEGAL_LIMIT_MS)
}

/// Infers the comparison direction from the event label. Jumps and throws
/// rank higher-is-better; everything else is assumed to be a time.
/// `extra_markers` extends the built-in lexicon from configuration.
pub fn infer_event_kind(label: &str, extra_markers: &[String]) -> EventKind {
    let folded = fold_french(label);
    let is_mark = MARK_EVENT_MARKERS
        .iter()
        .any(|marker| folded.contains(marker))
        || extra_markers
            .iter()
            .any(|marker| folded.contains(&fold_french(marker)));
    if is_mark {
        EventKind::Mark
    } else {
        EventKind::Timed
    }
}

/// Sort key: unresolved timestamps never win a "most recent" comparison.
fn sort_instant(point: &PerformancePoint) -> DateTime<Utc> {
    point.timestamp.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The season a point belongs to: its scrape-year hint, else the year of
/// its resolved timestamp.
fn season_year(point: &PerformancePoint) -> Option<i32> {
    point.year.or_else(|| point.timestamp.map(|t| t.year()))
}

/// Numerically best valued point. The slice is most-recent-first, so
/// replacing only on a strict improvement breaks ties toward recency.
/// Points without a numeric value are never candidates.
fn select_best<'a>(points: &'a [PerformancePoint], kind: EventKind) -> Option<&'a PerformancePoint> {
    let mut best: Option<(&PerformancePoint, f64)> = None;
    for point in points {
        let Some(value) = point.value else { continue };
        match best {
            None => best = Some((point, value)),
            Some((_, best_value)) => {
                let improves = match kind {
                    EventKind::Timed => value < best_value,
                    EventKind::Mark => value > best_value,
                };
                if improves {
                    best = Some((point, value));
                }
            }
        }
    }
    best.map(|(point, _)| point)
}

/// Aggregates one event's points into record / season / timeline views.
///
/// Pure in its inputs: the season is the explicit `current_year`, never the
/// wall clock. An empty point list yields empty sequences and absent
/// selections; nothing here errors.
pub fn aggregate_event(
    label: &str,
    kind: EventKind,
    mut points: Vec<PerformancePoint>,
    current_year: i32,
) -> EventAggregate {
    // Stable sort, most recent first.
    points.sort_by(|a, b| sort_instant(b).cmp(&sort_instant(a)));

    let legal_points: Vec<PerformancePoint> =
        points.iter().filter(|p| is_wind_legal(p)).cloned().collect();

    let best_legal = select_best(&legal_points, kind)
        .or_else(|| select_best(&points, kind))
        .cloned();

    let in_season =
        |p: &&PerformancePoint| season_year(p) == Some(current_year) && p.value.is_some();
    let best_current_season = legal_points
        .iter()
        .find(in_season)
        .or_else(|| points.iter().find(in_season))
        .cloned()
        .or_else(|| best_legal.clone());

    EventAggregate {
        event: label.to_string(),
        kind,
        all_points: points,
        legal_points,
        best_legal,
        best_current_season,
    }
}
