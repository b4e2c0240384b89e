//! Performance-value parsing.
//!
//! Times come in the federation's mixed notations: `42'59''` (minutes),
//! `12''34` (sprint seconds + centiseconds), `1:02.34` (colon-delimited),
//! sometimes with a corrected time in parentheses. Marks ("6,43") use a
//! comma decimal. Non-results ("DNF", "DSQ", "NM") and blanks carry no
//! numeric value at all — they must not collapse to `0`.

use once_cell::sync::Lazy;
use regex::Regex;

static PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").unwrap());
// mm'ss with an optional ''cc / "cc fraction.
static MIN_SEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\d{1,2})\s*'\s*(\d{1,2})(?:\s*(?:''|")\s*(\d{1,2}))?"#).unwrap()
});
// ss''cc for sub-minute results.
static SEC_CENTI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\b(\d{1,3})\s*(?:''|")\s*(\d{1,2})\b"#).unwrap());

/// Folds the unicode variants the site mixes freely (prime, double prime,
/// curly apostrophe, non-breaking space) into plain ASCII quoting.
fn fold_marks(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2032}' => '\'',
            '\u{2033}' => '"',
            '\u{a0}' => ' ',
            other => other,
        })
        .collect()
}

/// A 1-digit fraction token is tenths, a 2-digit token is hundredths.
fn fraction(token: &str) -> Option<f64> {
    let digits = token.parse::<f64>().ok()?;
    let factor = if token.len() == 1 { 10.0 } else { 100.0 };
    Some(digits / factor)
}

/// Keeps digits, sign and decimal separators; comma becomes the decimal
/// point. Returns `None` when nothing numeric remains.
fn numeric_part(value: &str) -> Option<f64> {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let kept = kept.replace(',', ".");
    if kept.trim().is_empty() {
        return None;
    }
    kept.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a free-text performance into a number: seconds for time notations,
/// the native unit for anything else. `None` for blanks and non-numeric
/// labels; never panics, never yields `0` for a non-result.
pub fn parse_performance(raw: &str) -> Option<f64> {
    let folded = fold_marks(raw);
    if folded.is_empty() {
        return None;
    }

    // A parenthetical segment (corrected or photo-finish time) wins over the
    // surrounding text.
    let scope = match PAREN.captures(&folded) {
        Some(caps) => caps[1].trim().to_string(),
        None => folded,
    };

    if let Some(caps) = MIN_SEC.captures(&scope) {
        let minutes = caps[1].parse::<f64>().ok()?;
        let seconds = caps[2].parse::<f64>().ok()?;
        let centis = match caps.get(3) {
            Some(token) => fraction(token.as_str())?,
            None => 0.0,
        };
        return Some(minutes * 60.0 + seconds + centis);
    }

    if let Some(caps) = SEC_CENTI.captures(&scope) {
        let seconds = caps[1].parse::<f64>().ok()?;
        return Some(seconds + fraction(&caps[2])?);
    }

    if scope.contains(':') {
        let parts: Vec<Option<f64>> = scope.split(':').map(numeric_part).collect();
        match parts.as_slice() {
            [Some(minutes), Some(seconds)] => return Some(minutes * 60.0 + seconds),
            [Some(hours), Some(minutes), Some(seconds)] => {
                return Some(hours * 3600.0 + minutes * 60.0 + seconds)
            }
            _ => {}
        }
    }

    // Plain numeric fallback: "6,43", "10.52", "981".
    numeric_part(&scope.replace("''", "."))
}
