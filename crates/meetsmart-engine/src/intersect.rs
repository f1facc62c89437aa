//! Find meeting windows where every participant is free.
//!
//! Each participant's intervals on a date are expanded into a grid of
//! fixed-duration windows advanced in [`SLOT_STEP_MINUTES`] increments. The
//! grids are then intersected as sets of start times, so overlapping or
//! adjacent raw intervals never need merging first.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{Result, SchedulingError};
use crate::model::{CandidateWindow, Interval, Participant};

/// Slotting granularity: candidate starts advance by this many minutes.
pub const SLOT_STEP_MINUTES: i64 = 10;

/// Intersection needs at least this many participants to be meaningful.
pub const MIN_PARTICIPANTS: usize = 2;

/// Intervals never cross midnight, so no window can be longer than a day.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Find every window of `duration_minutes` that fits inside the free time of
/// all participants on the same date, using the default 10-minute step.
///
/// Returns windows ordered by date, then by start time.
///
/// # Errors
/// Returns `SchedulingError::InvalidDuration` if `duration_minutes <= 0` and
/// `SchedulingError::InvalidInterval` if any interval has `start >= end`.
pub fn find_common_windows(
    participants: &[Participant],
    duration_minutes: i64,
) -> Result<Vec<CandidateWindow>> {
    find_common_windows_with_step(participants, duration_minutes, SLOT_STEP_MINUTES)
}

/// Same as [`find_common_windows`] with an explicit step in minutes.
pub fn find_common_windows_with_step(
    participants: &[Participant],
    duration_minutes: i64,
    step_minutes: i64,
) -> Result<Vec<CandidateWindow>> {
    if duration_minutes <= 0 {
        return Err(SchedulingError::InvalidDuration(duration_minutes));
    }
    if step_minutes <= 0 {
        return Err(SchedulingError::InvalidDuration(step_minutes));
    }
    for participant in participants {
        participant.validate()?;
    }

    if participants.len() < MIN_PARTICIPANTS {
        tracing::debug!(
            participants = participants.len(),
            "too few participants to intersect"
        );
        return Ok(Vec::new());
    }

    if duration_minutes > MINUTES_PER_DAY {
        tracing::debug!(duration_minutes, "duration longer than a day");
        return Ok(Vec::new());
    }

    // A step past one day yields one start per interval either way.
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(step_minutes.min(MINUTES_PER_DAY));

    let by_participant: Vec<BTreeMap<NaiveDate, Vec<&Interval>>> =
        participants.iter().map(group_by_date).collect();

    let mut windows = Vec::new();
    for date in full_coverage_dates(&by_participant) {
        let mut common: Option<BTreeSet<NaiveDateTime>> = None;
        for grouped in &by_participant {
            let intervals = grouped.get(&date).map(Vec::as_slice).unwrap_or_default();
            let starts = expand_starts(intervals, duration, step);
            common = Some(match common {
                None => starts,
                Some(acc) => acc.intersection(&starts).copied().collect(),
            });
            if common.as_ref().is_some_and(BTreeSet::is_empty) {
                break;
            }
        }

        let common = common.unwrap_or_default();
        tracing::debug!(%date, windows = common.len(), "intersected date");
        windows.extend(common.into_iter().filter_map(|start| {
            let end = start.checked_add_signed(duration)?;
            Some(CandidateWindow { start, end })
        }));
    }

    Ok(windows)
}

fn group_by_date(participant: &Participant) -> BTreeMap<NaiveDate, Vec<&Interval>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Interval>> = BTreeMap::new();
    for interval in &participant.availability {
        grouped.entry(interval.date).or_default().push(interval);
    }
    grouped
}

/// Dates on which every participant declared at least one interval, ascending.
fn full_coverage_dates(
    by_participant: &[BTreeMap<NaiveDate, Vec<&Interval>>],
) -> Vec<NaiveDate> {
    let Some((first, rest)) = by_participant.split_first() else {
        return Vec::new();
    };
    let dates: Vec<NaiveDate> = first
        .keys()
        .filter(|date| rest.iter().all(|grouped| grouped.contains_key(*date)))
        .copied()
        .collect();
    tracing::debug!(dates = dates.len(), "full-coverage dates");
    dates
}

/// Slide a `duration` window across each interval in `step` increments,
/// collecting every start whose window still ends inside the interval.
fn expand_starts(
    intervals: &[&Interval],
    duration: Duration,
    step: Duration,
) -> BTreeSet<NaiveDateTime> {
    let mut starts = BTreeSet::new();
    for interval in intervals {
        let end = interval.end_datetime();
        let mut cursor = Some(interval.start_datetime());
        while let Some(start) = cursor {
            match start.checked_add_signed(duration) {
                Some(window_end) if window_end <= end => {
                    starts.insert(start);
                    cursor = start.checked_add_signed(step);
                }
                _ => break,
            }
        }
    }
    starts
}
