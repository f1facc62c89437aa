//! The event a group is trying to schedule.
//!
//! An event fixes the meeting duration and the range of dates the organizer
//! is willing to consider. Windows starting outside that range are dropped
//! before scoring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::intersect::{find_common_windows_with_step, SLOT_STEP_MINUTES};
use crate::model::{CandidateWindow, Participant, ScoredWindow};
use crate::score::{score_windows, select_best};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_minutes: i64,
    /// How many responses the organizer expects.
    pub participants_count: u32,
}

impl Event {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SchedulingError::InvalidEvent("name must not be empty".into()));
        }
        if self.start_date > self.end_date {
            return Err(SchedulingError::InvalidEvent(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.duration_minutes <= 0 {
            return Err(SchedulingError::InvalidDuration(self.duration_minutes));
        }
        if self.participants_count == 0 {
            return Err(SchedulingError::InvalidEvent(
                "participants_count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Percentage of expected participants who have responded.
    pub fn participation_rate(&self, response_count: usize) -> f64 {
        if self.participants_count == 0 {
            return 0.0;
        }
        response_count as f64 / f64::from(self.participants_count) * 100.0
    }

    /// Whether `window` starts on a date within the event's range.
    pub fn covers(&self, window: &CandidateWindow) -> bool {
        let date = window.start.date();
        self.start_date <= date && date <= self.end_date
    }

    /// Common windows of the event's duration that start within its date range.
    pub fn find_common_windows(
        &self,
        participants: &[Participant],
    ) -> Result<Vec<CandidateWindow>> {
        self.find_common_windows_with_step(participants, SLOT_STEP_MINUTES)
    }

    pub fn find_common_windows_with_step(
        &self,
        participants: &[Participant],
        step_minutes: i64,
    ) -> Result<Vec<CandidateWindow>> {
        self.validate()?;
        let mut windows =
            find_common_windows_with_step(participants, self.duration_minutes, step_minutes)?;
        windows.retain(|w| self.covers(w));
        Ok(windows)
    }

    /// The highest-scoring in-range windows, sorted by start time.
    pub fn find_best_times(&self, participants: &[Participant]) -> Result<Vec<ScoredWindow>> {
        self.find_best_times_with_step(participants, SLOT_STEP_MINUTES)
    }

    pub fn find_best_times_with_step(
        &self,
        participants: &[Participant],
        step_minutes: i64,
    ) -> Result<Vec<ScoredWindow>> {
        let windows = self.find_common_windows_with_step(participants, step_minutes)?;
        tracing::debug!(event = %self.name, candidates = windows.len(), "scoring event windows");
        Ok(select_best(&score_windows(&windows, participants)))
    }
}
