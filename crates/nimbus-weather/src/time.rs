//! City-local time helpers.
//!
//! "Local" here means UTC shifted by the provider's timezone offset, not
//! real IANA rules. That offset arithmetic is what defines a city's day for
//! forecast bucketing, matching what the weather API reports per city.

use chrono::{DateTime, Utc};

fn shifted(timestamp: i64, timezone_offset_secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(timestamp.saturating_add(timezone_offset_secs), 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Calendar day key (`YYYY-MM-DD`) of a timestamp in the city's local time.
pub fn city_day_key(timestamp: i64, timezone_offset_secs: i64) -> String {
    shifted(timestamp, timezone_offset_secs)
        .format("%Y-%m-%d")
        .to_string()
}

/// Whether a timestamp falls on the city's current local day.
pub fn is_city_today(timestamp: i64, timezone_offset_secs: i64) -> bool {
    is_city_today_at(timestamp, timezone_offset_secs, Utc::now().timestamp())
}

/// Same as [`is_city_today`] with an explicit "now" for deterministic use.
pub fn is_city_today_at(timestamp: i64, timezone_offset_secs: i64, now_unix: i64) -> bool {
    city_day_key(timestamp, timezone_offset_secs) == city_day_key(now_unix, timezone_offset_secs)
}

/// Display time (`HH:MM`) of a timestamp in the city's local time.
pub fn format_time(timestamp: i64, timezone_offset_secs: i64) -> String {
    shifted(timestamp, timezone_offset_secs)
        .format("%H:%M")
        .to_string()
}

/// Lowercase three-letter weekday ("mon", "tue", ...) of a timestamp in the
/// city's local time.
pub fn weekday_label(timestamp: i64, timezone_offset_secs: i64) -> String {
    shifted(timestamp, timezone_offset_secs)
        .format("%a")
        .to_string()
        .to_lowercase()
}
