//! Epoch-millisecond time helpers.
//!
//! All persisted timestamps are epoch milliseconds (`i64`), with `0`
//! meaning "unset" for entry/exit capture fields.

use chrono::{DateTime, TimeZone, Utc};

/// Milliseconds in one minute.
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole minutes elapsed between two epoch-millisecond instants.
pub fn minutes_between(start_millis: i64, end_millis: i64) -> i64 {
    (end_millis - start_millis) / MILLIS_PER_MINUTE
}

/// Convert an epoch-millisecond timestamp to a UTC datetime, for display
/// and logging. Returns `None` for out-of-range values.
pub fn to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
