use chrono::{NaiveDateTime, Utc};

/// Current wall-clock instant in UTC, without offset.
///
/// Every persisted timestamp is a UTC `NaiveDateTime`.
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Whole days elapsed from `from` to `to`, with the fractional part dropped.
///
/// Returns `None` when `to` precedes `from`, so callers can treat clock skew
/// explicitly instead of reading a negative count.
pub fn elapsed_whole_days(from: NaiveDateTime, to: NaiveDateTime) -> Option<i64> {
    if to < from {
        return None;
    }
    Some((to - from).num_days())
}
