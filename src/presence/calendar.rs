//! Calendar-day normalization and weekday arithmetic.
//!
//! Every "same day" comparison in the crate goes through [`day_of`] or a
//! value it produced, so date strings and timestamps never get compared raw.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer};

/// The calendar day a timestamp falls on, in the timestamp's own offset.
pub fn day_of(timestamp: &DateTime<FixedOffset>) -> NaiveDate {
    timestamp.date_naive()
}

/// Parse either `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar day.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|ts| day_of(&ts))
}

/// Serde adapter for [`parse_day`].
pub fn deserialize_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date '{}': expected YYYY-MM-DD or an RFC 3339 timestamp",
            raw
        ))
    })
}

/// Serde adapter for optional days in query strings.
pub fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_day(&s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{}': expected YYYY-MM-DD or an RFC 3339 timestamp",
                s
            ))
        }),
    }
}

pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first weekday strictly after `day`.
pub fn next_weekday(day: NaiveDate) -> NaiveDate {
    let mut candidate = day + Days::new(1);
    while is_weekend(candidate) {
        candidate = candidate + Days::new(1);
    }
    candidate
}

/// The first `count` weekdays starting at `start`, `start` included when it
/// is a weekday.
pub fn weekdays_from(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = start;
    while days.len() < count {
        if !is_weekend(current) {
            days.push(current);
        }
        current = current + Days::new(1);
    }
    days
}
