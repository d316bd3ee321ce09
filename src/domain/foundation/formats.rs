//! Format guards shared by the step checks and the document validator.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Minimum whitespace-delimited tokens for long free-text fields.
pub const MIN_WORD_COUNT: usize = 50;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@(?i-u:cisco\.com)$").expect("email pattern is valid"));

static DOWNTIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("downtime pattern is valid"));

static LOOSE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("release date pattern is valid")
});

/// Returns true for `local@cisco.com`, domain matched case-insensitively.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Returns true when `value` parses as an absolute `http` or `https` URL.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Returns true for an `HH:MM:SS` duration such as `00:30:00`.
pub fn is_valid_downtime(value: &str) -> bool {
    DOWNTIME_RE.is_match(value)
}

/// Counts whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Returns true when `text` has at least `min` tokens.
pub fn has_min_words(text: &str, min: usize) -> bool {
    word_count(text) >= min
}

/// Zero-pads a `YYYY-M-D` date when it is a real calendar day.
///
/// Input that is not a recognisable date is returned trimmed and untouched.
pub fn normalize_release_date(input: &str) -> String {
    let trimmed = input.trim();
    let Some(caps) = LOOSE_DATE_RE.captures(trimmed) else {
        return trimmed.to_string();
    };
    let parsed = (
        caps[1].parse::<i32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    );
    match parsed {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| trimmed.to_string()),
        _ => trimmed.to_string(),
    }
}
