//! Wind-gauge reading parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static UNIT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)m\s*/?\s*s").unwrap());
static SIGNED_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").unwrap());

/// Parses a free-text anemometer reading ("+1.2", "-0,8 m/s", "2,0ms") into
/// a signed m/s value. `None` when the text is blank or carries no number.
pub fn parse_wind(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', ".");
    let cleaned = UNIT_SUFFIX.replace_all(&cleaned, "");
    let found = SIGNED_NUMBER.find(cleaned.trim())?;
    found.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}
