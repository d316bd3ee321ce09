//! Wall-clock timestamps in the `YYYY-MM-DD HH:MM:SS` wire format.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Wire format used by `validation_summary.last_validated_on`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2}) ([0-9]{2}):([0-9]{2}):([0-9]{2})$")
        .expect("timestamp pattern is valid")
});

static DATETIME_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2})(?::([0-9]{2}))?$")
        .expect("datetime-local pattern is valid")
});

/// A calendar-valid local timestamp without zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidationTimestamp(NaiveDateTime);

impl ValidationTimestamp {
    /// Parses `YYYY-MM-DD HH:MM:SS`.
    ///
    /// The shape must match exactly and every component must survive a
    /// round-trip through date construction, so `2024-02-30 10:00:00` and
    /// `2024-01-01 10:00:60` are both rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let caps = TIMESTAMP_RE.captures(input).ok_or_else(|| {
            ValidationError::invalid_format("timestamp", "must be YYYY-MM-DD HH:MM:SS")
        })?;
        let parts: Vec<u32> = (1..=6)
            .map(|i| caps[i].parse::<u32>().unwrap_or(u32::MAX))
            .collect();
        Self::from_parts(&parts).ok_or_else(|| {
            ValidationError::invalid_format("timestamp", "not a real calendar date/time")
        })
    }

    /// Parses a browser `datetime-local` value (`YYYY-MM-DDTHH:MM[:SS]`).
    pub fn from_datetime_local(input: &str) -> Result<Self, ValidationError> {
        let caps = DATETIME_LOCAL_RE.captures(input.trim()).ok_or_else(|| {
            ValidationError::invalid_format("timestamp", "must be YYYY-MM-DDTHH:MM")
        })?;
        let parts: Vec<u32> = (1..=6)
            .map(|i| {
                caps.get(i)
                    .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
                    .unwrap_or(0)
            })
            .collect();
        Self::from_parts(&parts).ok_or_else(|| {
            ValidationError::invalid_format("timestamp", "not a real calendar date/time")
        })
    }

    fn from_parts(parts: &[u32]) -> Option<Self> {
        let year = i32::try_from(parts[0]).ok()?;
        let dt = NaiveDate::from_ymd_opt(year, parts[1], parts[2])?
            .and_hms_opt(parts[3], parts[4], parts[5])?;
        let round_trips = dt.year() == year
            && dt.month() == parts[1]
            && dt.day() == parts[2]
            && dt.hour() == parts[3]
            && dt.minute() == parts[4]
            && dt.second() == parts[5];
        round_trips.then_some(Self(dt))
    }
}

impl fmt::Display for ValidationTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for ValidationTimestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ValidationTimestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Returns true when `input` is a calendar-valid `YYYY-MM-DD HH:MM:SS`.
pub fn is_valid_timestamp(input: &str) -> bool {
    ValidationTimestamp::parse(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_well_formed_timestamp() {
        assert!(is_valid_timestamp("2024-01-15 10:30:00"));
    }

    #[test]
    fn rejects_impossible_calendar_date() {
        assert!(!is_valid_timestamp("2024-02-30 10:00:00"));
    }

    #[test]
    fn accepts_leap_day_in_leap_year() {
        assert!(is_valid_timestamp("2024-02-29 10:00:00"));
    }

    #[test]
    fn rejects_leap_day_in_common_year() {
        assert!(!is_valid_timestamp("2023-02-29 10:00:00"));
    }

    #[test]
    fn rejects_out_of_range_clock_values() {
        assert!(!is_valid_timestamp("2024-01-01 24:00:00"));
        assert!(!is_valid_timestamp("2024-01-01 10:60:00"));
        assert!(!is_valid_timestamp("2024-01-01 10:00:60"));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(!is_valid_timestamp("2024-1-15 10:30:00"));
        assert!(!is_valid_timestamp("2024-01-15T10:30:00"));
        assert!(!is_valid_timestamp("2024-01-15 10:30"));
        assert!(!is_valid_timestamp(" 2024-01-15 10:30:00"));
    }

    #[test]
    fn datetime_local_is_reformatted() {
        let ts = ValidationTimestamp::from_datetime_local("2024-03-05T09:07").unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 09:07:00");

        let ts = ValidationTimestamp::from_datetime_local("2024-03-05T09:07:42").unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 09:07:42");
    }

    #[test]
    fn serde_uses_wire_format() {
        let ts = ValidationTimestamp::parse("2024-12-31 23:59:59").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2024-12-31 23:59:59\"");
        let back: ValidationTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    proptest! {
        #[test]
        fn formatted_timestamps_always_parse(
            y in 1970i32..2100,
            m in 1u32..=12,
            d in 1u32..=28,
            h in 0u32..24,
            mi in 0u32..60,
            s in 0u32..60,
        ) {
            let text = format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02}", y, m, d, h, mi, s);
            let parsed = ValidationTimestamp::parse(&text);
            prop_assert!(parsed.is_ok());
            prop_assert_eq!(parsed.unwrap().to_string(), text);
        }
    }
}
