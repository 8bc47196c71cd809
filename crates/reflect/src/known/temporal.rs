//! Duration and timestamp leaf parsers

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::ParseError;

/// Parse a human-readable duration such as `13s` or `1h 30m`
pub fn parse_duration(input: &str) -> Result<Duration, ParseError> {
    humantime::parse_duration(input.trim()).map_err(|source| ParseError::Duration {
        input: input.to_owned(),
        source,
    })
}

/// Canonical text of a duration, accepted back by [`parse_duration`]
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}

/// Parse a timestamp as RFC 3339 first, then with the given chrono layout
pub fn parse_timestamp(input: &str, layout: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let trimmed = input.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, layout))
        .map_err(|source| ParseError::Timestamp {
            input: input.to_owned(),
            source,
        })
}

/// The zero timestamp: the Unix epoch at UTC
pub fn zero_timestamp() -> DateTime<FixedOffset> {
    DateTime::<Utc>::default().fixed_offset()
}
