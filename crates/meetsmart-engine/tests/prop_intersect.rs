//! Property-based tests for intersection and selection using proptest.
//!
//! These hold for any valid group of participants, not just the fixed
//! scenarios in `intersect_tests.rs` and `score_tests.rs`.

use chrono::{Duration, NaiveDate, NaiveTime};
use meetsmart_engine::{
    find_common_windows, score_windows, select_best, DayPreference, Interval, Participant,
    TimePreference,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_day_preference() -> impl Strategy<Value = DayPreference> {
    prop_oneof![
        Just(DayPreference::Weekdays),
        Just(DayPreference::Weekends),
        Just(DayPreference::None),
    ]
}

fn arb_time_preference() -> impl Strategy<Value = TimePreference> {
    prop_oneof![
        Just(TimePreference::Morning),
        Just(TimePreference::Afternoon),
        Just(TimePreference::Evening),
        Just(TimePreference::Night),
        Just(TimePreference::None),
    ]
}

/// An interval within one week of 2024-01-08, on a 5-minute grid, 5..=300 minutes long.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0i64..7, 0u32..(22 * 12), 1u32..=60).prop_map(|(day, start_slot, len_slots)| {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap() + Duration::days(day);
        let start_min = start_slot * 5;
        let end_min = (start_min + len_slots * 5).min(23 * 60 + 55);
        Interval {
            date,
            start: NaiveTime::from_hms_opt(start_min / 60, start_min % 60, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end_min / 60, end_min % 60, 0).unwrap(),
        }
    })
}

fn arb_participant() -> impl Strategy<Value = Participant> {
    (
        "[a-z]{3,8}",
        prop::collection::vec(arb_interval(), 0..6),
        arb_day_preference(),
        arb_time_preference(),
    )
        .prop_map(|(id, availability, day, time)| {
            Participant::new(&id, availability).with_preferences(day, time)
        })
}

fn arb_duration() -> impl Strategy<Value = i64> {
    prop_oneof![Just(10i64), Just(15), Just(30), Just(45), Just(60), Just(90)]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn every_window_has_requested_duration(
        people in prop::collection::vec(arb_participant(), 2..5),
        duration in arb_duration(),
    ) {
        let windows = find_common_windows(&people, duration).unwrap();
        for w in &windows {
            prop_assert_eq!(w.duration_minutes(), duration);
        }
    }

    #[test]
    fn every_window_is_contained_for_each_participant(
        people in prop::collection::vec(arb_participant(), 2..5),
        duration in arb_duration(),
    ) {
        let windows = find_common_windows(&people, duration).unwrap();
        for w in &windows {
            for p in &people {
                prop_assert!(
                    p.availability.iter().any(|iv| iv.contains(w)),
                    "window {} not inside any interval of {}", w, p.id
                );
            }
        }
    }

    #[test]
    fn fewer_than_two_participants_is_always_empty(
        people in prop::collection::vec(arb_participant(), 0..2),
        duration in arb_duration(),
    ) {
        prop_assert!(find_common_windows(&people, duration).unwrap().is_empty());
    }

    #[test]
    fn output_is_deterministic(
        people in prop::collection::vec(arb_participant(), 2..5),
        duration in arb_duration(),
    ) {
        let first = find_common_windows(&people, duration).unwrap();
        let second = find_common_windows(&people, duration).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(score_windows(&first, &people), score_windows(&second, &people));
    }

    #[test]
    fn windows_are_strictly_ascending(
        people in prop::collection::vec(arb_participant(), 2..5),
        duration in arb_duration(),
    ) {
        let windows = find_common_windows(&people, duration).unwrap();
        for pair in windows.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn select_best_keeps_only_the_maximum(
        people in prop::collection::vec(arb_participant(), 2..5),
        duration in arb_duration(),
    ) {
        let windows = find_common_windows(&people, duration).unwrap();
        let scored = score_windows(&windows, &people);
        let best = select_best(&scored);

        prop_assert_eq!(scored.is_empty(), best.is_empty());
        if let Some(max) = scored.iter().map(|s| s.score).max() {
            prop_assert!(best.iter().all(|s| s.score == max));
            let tied = scored.iter().filter(|s| s.score == max).count();
            prop_assert_eq!(best.len(), tied);
        }
        for s in &scored {
            prop_assert!(s.score as usize <= 2 * people.len());
        }
    }
}
