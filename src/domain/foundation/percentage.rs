//! Coverage percentage guards (`80%` style strings).
//!
//! The wire form matches `^[0-9]{1,3}%$`. The three-digit cap is the only
//! bound, so `999%` is accepted just as the form accepts it.

use once_cell::sync::Lazy;
use regex::Regex;

static PERCENTAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}%$").expect("percentage pattern is valid"));

static BARE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").expect("bare number pattern is valid"));

/// Trims the input and appends `%` when it is a bare 1-3 digit number.
///
/// Anything else is returned trimmed but otherwise untouched, so invalid
/// input stays visible to the format check.
pub fn normalize_percentage(input: &str) -> String {
    let trimmed = input.trim();
    if BARE_NUMBER_RE.is_match(trimmed) {
        format!("{}%", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Returns true for strings like `"80%"`, `"5%"`, `"100%"`.
pub fn is_valid_percentage(value: &str) -> bool {
    PERCENTAGE_RE.is_match(value)
}
