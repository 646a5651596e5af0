//! # Display Formatting
//!
//! Text shown on listing cards that is not currency: how long ago a
//! listing was posted.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Human-readable age of a listing: `"3 Hours Ago"`, `"1 Day Ago"`.
///
/// Uses the largest whole unit. A `created` in the future counts as
/// zero seconds old.
///
/// ## Example
/// ```rust
/// use bazaar_core::format::format_time_ago;
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// assert_eq!(format_time_ago(now - Duration::minutes(90), now), "1 Hour Ago");
/// assert_eq!(format_time_ago(now - Duration::seconds(1), now), "1 Second Ago");
/// ```
pub fn format_time_ago(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created).num_seconds().max(0);
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{} Day{} Ago", days, plural(days))
    } else if hours > 0 {
        format!("{} Hour{} Ago", hours, plural(hours))
    } else if mins > 0 {
        format!("{} Min{} Ago", mins, plural(mins))
    } else {
        format!("{} Second{} Ago", secs, plural(secs))
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parses a listing timestamp as stored by the API.
///
/// Accepts epoch milliseconds (bare or quoted), RFC 3339, and SQLite's
/// `YYYY-MM-DD HH:MM:SS` (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(millis) = raw.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// [`format_time_ago`] for a raw timestamp; unparsable input yields `""`.
pub fn format_time_ago_raw(raw: &str, now: DateTime<Utc>) -> String {
    parse_timestamp(raw)
        .map(|created| format_time_ago(created, now))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_units() {
        let now = now();
        assert_eq!(format_time_ago(now - Duration::days(3), now), "3 Days Ago");
        assert_eq!(format_time_ago(now - Duration::hours(25), now), "1 Day Ago");
        assert_eq!(format_time_ago(now - Duration::hours(2), now), "2 Hours Ago");
        assert_eq!(format_time_ago(now - Duration::minutes(1), now), "1 Min Ago");
        assert_eq!(format_time_ago(now - Duration::seconds(59), now), "59 Seconds Ago");
        assert_eq!(format_time_ago(now, now), "0 Seconds Ago");
    }

    #[test]
    fn test_future_is_clamped() {
        let now = now();
        assert_eq!(format_time_ago(now + Duration::hours(1), now), "0 Seconds Ago");
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = now();
        let millis = expected.timestamp_millis().to_string();
        assert_eq!(parse_timestamp(&millis), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01T12:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-06-01 12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_format_raw() {
        let now = now();
        assert_eq!(format_time_ago_raw("2025-06-01 10:00:00", now), "2 Hours Ago");
        assert_eq!(format_time_ago_raw("not a date", now), "");
    }
}
