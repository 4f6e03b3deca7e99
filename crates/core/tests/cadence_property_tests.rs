//! Property-based tests for accrual cadence arithmetic.
//!
//! These verify the due-check invariants across arbitrary anchors, cadences
//! and elapsed durations using the `proptest` crate.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use outlays_core::accrual::{is_due, next_due_at};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

/// Generates an anchor timestamp between 2000 and roughly 2060.
fn arb_anchor() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..(60 * 365 * 86_400)).prop_map(|secs| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::seconds(secs)
    })
}

fn arb_cadence() -> impl Strategy<Value = i32> {
    1i32..=400
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Anything short of a full cadence is never due.
    #[test]
    fn not_due_before_full_cadence(
        anchor in arb_anchor(),
        cadence in arb_cadence(),
        shortfall_secs in 1i64..=86_400,
        earlier_days in 0i64..400,
    ) {
        let full = Duration::days(i64::from(cadence));
        let elapsed = full - Duration::seconds(shortfall_secs);
        prop_assert!(!is_due(anchor, cadence, anchor + elapsed));
        let earlier = (elapsed - Duration::days(earlier_days)).max(Duration::zero());
        prop_assert!(!is_due(anchor, cadence, anchor + earlier));
    }

    /// Once due, an obligation stays due as time moves on.
    #[test]
    fn due_is_monotonic_in_time(
        anchor in arb_anchor(),
        cadence in arb_cadence(),
        extra_secs in 0i64..86_400 * 1000,
    ) {
        let boundary = anchor + Duration::days(i64::from(cadence));
        prop_assert!(is_due(anchor, cadence, boundary));
        prop_assert!(is_due(anchor, cadence, boundary + Duration::seconds(extra_secs)));
    }

    /// Advancing the anchor to `now` makes the obligation not due at `now`.
    #[test]
    fn applying_resets_due_state(
        anchor in arb_anchor(),
        cadence in arb_cadence(),
        extra_days in 0i64..1000,
    ) {
        let now = anchor + Duration::days(i64::from(cadence) + extra_days);
        prop_assert!(is_due(anchor, cadence, now));
        prop_assert!(!is_due(now, cadence, now));
    }

    /// Clock skew never produces an accrual.
    #[test]
    fn future_anchor_is_never_due(
        now in arb_anchor(),
        cadence in arb_cadence(),
        skew_secs in 1i64..86_400 * 1000,
    ) {
        prop_assert!(!is_due(now + Duration::seconds(skew_secs), cadence, now));
    }

    /// `next_due_at` is exactly the first due instant.
    #[test]
    fn next_due_at_is_the_boundary(anchor in arb_anchor(), cadence in arb_cadence()) {
        let next = next_due_at(anchor, cadence).unwrap();
        prop_assert!(is_due(anchor, cadence, next));
        prop_assert!(!is_due(anchor, cadence, next - Duration::seconds(1)));
    }
}
