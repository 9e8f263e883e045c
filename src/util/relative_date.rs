//! "Posted N days ago" formatting for listing timestamps.
//!
//! Elapsed time is rounded *up* to whole days, then bucketed:
//! 1 day, up to a week in days, up to 30 days in (rounded-up) weeks, and an
//! absolute `M/D/YYYY` date beyond that.

#[cfg(test)]
#[path = "relative_date_test.rs"]
mod relative_date_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

const DAY_MS: i128 = 24 * 60 * 60 * 1000;

/// Parse an API timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let naive = raw.replacen(' ', "T", 1);
    let datetime = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
    if let Ok(parsed) = PrimitiveDateTime::parse(&naive, datetime) {
        return Some(parsed.assume_utc());
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Whole days between two instants, rounded up, regardless of direction.
pub fn elapsed_days(created: OffsetDateTime, now: OffsetDateTime) -> i128 {
    let millis = (now - created).abs().whole_milliseconds();
    (millis + DAY_MS - 1) / DAY_MS
}

/// Relative label for `created` as seen at `now`.
pub fn format_relative(created: OffsetDateTime, now: OffsetDateTime) -> String {
    let days = elapsed_days(created, now);
    if days == 1 {
        return "1 day ago".to_owned();
    }
    if days <= 7 {
        return format!("{days} days ago");
    }
    if days <= 30 {
        let weeks = (days + 6) / 7;
        return format!("{weeks} weeks ago");
    }
    format_absolute(created.date())
}

/// `M/D/YYYY`, without zero padding.
pub fn format_absolute(date: Date) -> String {
    format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
}

/// Label for a raw API timestamp at `now`; unparsable input is echoed back.
pub fn format_posted_at(raw: &str, now: OffsetDateTime) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |created| format_relative(created, now))
}

/// `format_posted_at` against the current clock.
pub fn format_posted(raw: &str) -> String {
    format_posted_at(raw, OffsetDateTime::now_utc())
}
