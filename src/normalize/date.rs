//! Free-text date resolution.
//!
//! The source site prints dates either as "<day> <French month>" without a
//! year (the season year comes from the page the row was scraped under), as
//! "dd/mm/yyyy" / "dd/mm/yy", or occasionally as an ISO string.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::fold_french;

/// French month lexicon, matched after accent folding and period stripping.
/// Longer spellings first so "mars" is not shadowed by "mar".
const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("janv", 1),
    ("jan", 1),
    ("fevrier", 2),
    ("fevr", 2),
    ("fev", 2),
    ("mars", 3),
    ("mar", 3),
    ("avril", 4),
    ("avr", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("juil", 7),
    ("aout", 8),
    ("septembre", 9),
    ("sept", 9),
    ("octobre", 10),
    ("oct", 10),
    ("novembre", 11),
    ("nov", 11),
    ("decembre", 12),
    ("dec", 12),
];

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})\s+([a-z]+)").unwrap());
static DAY_SLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2,4})").unwrap());

fn month_index(token: &str) -> Option<u32> {
    MONTHS.iter().find(|(name, _)| *name == token).map(|(_, m)| *m)
}

/// Calendar-day sources carry no time of day; noon UTC keeps date-only
/// comparisons stable regardless of the caller's timezone.
fn noon_utc(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0)?))
}

/// Resolves a free-text date plus a season-year hint into an absolute
/// instant. Returns `None` when nothing matches; never errors.
///
/// When the "<day> <month>" form needs a year and the hint is absent, the
/// caller-supplied `current_year` substitutes — the wall clock is never read
/// here.
pub fn resolve_date(raw: &str, year_hint: Option<i32>, current_year: i32) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = fold_french(&trimmed.replace('.', ""));

    // "12 mars" / "3 fév." — the only form that needs the year hint.
    if let Some(caps) = DAY_MONTH.captures(&cleaned) {
        if let (Ok(day), Some(month)) = (caps[1].parse::<u32>(), month_index(&caps[2])) {
            if (1..=31).contains(&day) {
                let year = year_hint.unwrap_or(current_year);
                if let Some(resolved) = noon_utc(year, month, day) {
                    return Some(resolved);
                }
            }
        }
    }

    // "dd/mm/yyyy" or "dd/mm/yy", slash or hyphen separated.
    if let Some(caps) = DAY_SLASH.captures(&cleaned) {
        let day = caps[1].parse::<u32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        let year_num = caps[3].parse::<i32>().ok()?;
        let year = if year_num < 100 { 2000 + year_num } else { year_num };
        if let Some(resolved) = noon_utc(year, month, day) {
            return Some(resolved);
        }
    }

    // Fallback: a directly parseable date string.
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return noon_utc(parsed.year(), parsed.month(), parsed.day());
    }

    None
}
