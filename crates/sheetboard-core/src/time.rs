//! Relative and wall-clock time formatting for cards and the page header.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Offset-less layouts accepted besides RFC 3339, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
/// Date-only layouts read as local midnight.
const LOCAL_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y/%m/%d", "%b %d, %Y", "%B %d, %Y"];
/// Date-only ISO is midnight UTC.
const UTC_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a sheet timestamp relative to `now`.
///
/// - empty → `"No date"`
/// - unparseable → returned unchanged
/// - under a minute, or in the future → `"Just now"`
/// - under an hour / a day / a week → `"{N}m ago"` / `"{N}h ago"` / `"{N}d ago"`
/// - older → `"Oct 5"`, or `"Oct 5, 2024"` when the year differs from `now`
///
/// Offset-less timestamps are read in `now`'s time zone, except a bare
/// `YYYY-MM-DD`, which is midnight UTC. See [`parse_timestamp`] for the
/// accepted layouts.
pub fn format_time<Tz: TimeZone>(timestamp: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if timestamp.is_empty() {
        return "No date".to_string();
    }

    let Some(date) = parse_timestamp(timestamp, &now.timezone()) else {
        tracing::debug!(timestamp, "unparseable timestamp, displaying raw value");
        return timestamp.to_string();
    };

    let delta_ms = now.clone().signed_duration_since(&date).num_milliseconds();
    if delta_ms < MINUTE_MS {
        return "Just now".to_string();
    }
    if delta_ms < HOUR_MS {
        return format!("{}m ago", delta_ms / MINUTE_MS);
    }
    if delta_ms < DAY_MS {
        return format!("{}h ago", delta_ms / HOUR_MS);
    }
    if delta_ms < 7 * DAY_MS {
        return format!("{}d ago", delta_ms / DAY_MS);
    }

    if date.year() == now.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// en-US 12-hour clock with two-digit fields, e.g. `"02:05:09 PM"`.
pub fn format_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%I:%M:%S %p").to_string()
}

/// Parse a sheet timestamp into `tz`.
///
/// Accepts RFC 3339, ISO-like `YYYY-MM-DD[ HH:MM[:SS[.fff]]]` (also with
/// `/` separators), the US `M/D/YYYY[ H:MM[:SS]]` layout that form exports
/// use, and `Oct 5, 2026`. Anything else yields `None`.
pub fn parse_timestamp<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(s, UTC_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(tz));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            LOCAL_DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // Ambiguous local times (DST fold) take the earlier instant.
    tz.from_local_datetime(&naive).earliest()
}
