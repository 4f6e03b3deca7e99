use chrono::{Duration, NaiveDateTime};

use crate::utils::time_utils::elapsed_whole_days;

/// Whether an obligation anchored at `last_applied_at` is due at `now`.
///
/// Only whole elapsed days count. An anchor in the future is never due, and
/// neither is a non-positive cadence.
pub fn is_due(last_applied_at: NaiveDateTime, cadence_days: i32, now: NaiveDateTime) -> bool {
    if cadence_days <= 0 {
        return false;
    }
    match elapsed_whole_days(last_applied_at, now) {
        Some(days) => days >= i64::from(cadence_days),
        None => false,
    }
}

/// Earliest instant at which [`is_due`] turns true.
pub fn next_due_at(last_applied_at: NaiveDateTime, cadence_days: i32) -> Option<NaiveDateTime> {
    if cadence_days <= 0 {
        return None;
    }
    last_applied_at.checked_add_signed(Duration::days(i64::from(cadence_days)))
}
