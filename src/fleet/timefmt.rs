//! Timestamp parsing and display helpers.

use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{
        FormatItem,
        well_known::{Iso8601, Rfc3339},
    },
    macros::format_description,
};

/// Placeholder shown wherever a value is missing.
pub const NOT_AVAILABLE: &str = "N/A";

const CLOCK_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]");
const DATE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Offset used for display, falling back to UTC when the local one is unknown.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// `HH:MM` in the display offset, or `N/A`.
pub fn clock(timestamp: Option<OffsetDateTime>, offset: UtcOffset) -> String {
    render(timestamp, offset, CLOCK_FORMAT)
}

/// `YYYY-MM-DD HH:MM:SS` in the display offset, or `N/A`.
pub fn date_time(timestamp: Option<OffsetDateTime>, offset: UtcOffset) -> String {
    render(timestamp, offset, DATE_TIME_FORMAT)
}

fn render(
    timestamp: Option<OffsetDateTime>,
    offset: UtcOffset,
    format: &[FormatItem<'static>],
) -> String {
    timestamp
        .and_then(|value| value.to_offset(offset).format(format).ok())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
