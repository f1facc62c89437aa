//! Rank candidate windows by how many stated preferences they satisfy.
//!
//! Each participant contributes up to two points per window: one when the
//! window starts on their preferred kind of day, one when it starts in their
//! preferred time-of-day bucket. Ties are kept, never broken.

use crate::error::Result;
use crate::intersect;
use crate::model::{CandidateWindow, Participant, ScoredWindow};

/// Score a single window against every participant's preferences.
pub fn score_window(window: &CandidateWindow, participants: &[Participant]) -> u32 {
    participants
        .iter()
        .map(|p| p.preference_points(window.start))
        .sum()
}

/// Score every window, preserving input order.
pub fn score_windows(
    windows: &[CandidateWindow],
    participants: &[Participant],
) -> Vec<ScoredWindow> {
    windows
        .iter()
        .map(|window| ScoredWindow {
            window: *window,
            score: score_window(window, participants),
        })
        .collect()
}

/// Keep every window sharing the maximum score, sorted by start time.
///
/// Returns an empty vector when `scored` is empty.
pub fn select_best(scored: &[ScoredWindow]) -> Vec<ScoredWindow> {
    let Some(max) = scored.iter().map(|s| s.score).max() else {
        return Vec::new();
    };

    let mut best: Vec<ScoredWindow> = scored.iter().filter(|s| s.score == max).copied().collect();
    best.sort_by_key(|s| (s.window.start, s.window.end));
    tracing::debug!(max_score = max, tied = best.len(), "selected best windows");
    best
}

/// Intersect availability, score the candidates, and return the tied optima.
///
/// An empty result means no common time exists; it is not an error.
pub fn find_best_times(
    participants: &[Participant],
    duration_minutes: i64,
) -> Result<Vec<ScoredWindow>> {
    let windows = intersect::find_common_windows(participants, duration_minutes)?;
    let scored = score_windows(&windows, participants);
    Ok(select_best(&scored))
}
