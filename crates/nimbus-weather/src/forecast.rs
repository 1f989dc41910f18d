//! Forecast bucketing by city-local day.

use chrono::Utc;

use crate::time::{is_city_today_at, weekday_label};
use crate::types::ForecastSlot;

/// Bucket key for slots on the city's current local day.
pub const TODAY_KEY: &str = "today";

/// A named group of forecast slots sharing a city-local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBucket {
    /// `"today"` or a lowercase three-letter weekday label
    pub key: String,
    /// Slots in their original (chronological) order
    pub slots: Vec<ForecastSlot>,
}

/// Group forecast slots into day-labeled buckets.
///
/// Slots on the current local day go under `"today"`, except slots whose
/// timestamp has already elapsed, which are dropped. Other days are keyed by
/// their weekday label. `"today"` sorts first; the remaining buckets keep
/// the order in which their days were first encountered, which for the
/// provider's chronological list is calendar order within the 5-day window.
pub fn group_by_city_day(slots: &[ForecastSlot], timezone_offset_secs: i64) -> Vec<ForecastBucket> {
    group_by_city_day_at(slots, timezone_offset_secs, Utc::now().timestamp())
}

/// Same as [`group_by_city_day`] with an explicit "now" for deterministic use.
pub fn group_by_city_day_at(
    slots: &[ForecastSlot],
    timezone_offset_secs: i64,
    now_unix: i64,
) -> Vec<ForecastBucket> {
    let mut buckets: Vec<ForecastBucket> = Vec::new();

    for slot in slots {
        let key = if is_city_today_at(slot.dt, timezone_offset_secs, now_unix) {
            // No point showing hourly slots that have already passed
            if slot.dt < now_unix {
                continue;
            }
            TODAY_KEY.to_string()
        } else {
            weekday_label(slot.dt, timezone_offset_secs)
        };

        match buckets.iter_mut().find(|bucket| bucket.key == key) {
            Some(bucket) => bucket.slots.push(slot.clone()),
            None => buckets.push(ForecastBucket {
                key,
                slots: vec![slot.clone()],
            }),
        }
    }

    if let Some(pos) = buckets.iter().position(|bucket| bucket.key == TODAY_KEY) {
        if pos > 0 {
            let today = buckets.remove(pos);
            buckets.insert(0, today);
        }
    }

    buckets
}
