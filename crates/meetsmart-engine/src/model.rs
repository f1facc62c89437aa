//! Value types shared by the intersector and the scorer.
//!
//! All times are naive: callers hand the engine values already expressed in a
//! single zone, so no offset arithmetic happens here.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// One contiguous block a participant marked as free, scoped to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Interval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(SchedulingError::InvalidRange { date, start, end });
        }
        Ok(Self { date, start, end })
    }

    /// Check `start < end`, attributing a failure to `participant`.
    pub fn validate(&self, participant: &str) -> Result<()> {
        if self.start >= self.end {
            return Err(SchedulingError::InvalidInterval {
                participant: participant.to_string(),
                date: self.date,
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn end_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.end)
    }

    /// Whether `window` lies entirely inside this interval.
    pub fn contains(&self, window: &CandidateWindow) -> bool {
        self.start_datetime() <= window.start && window.end <= self.end_datetime()
    }
}

/// Preferred category of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPreference {
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    #[default]
    None,
}

impl DayPreference {
    /// Whether `weekday` satisfies this preference. `None` never matches.
    pub fn matches(self, weekday: Weekday) -> bool {
        let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        match self {
            DayPreference::Weekdays => !weekend,
            DayPreference::Weekends => weekend,
            DayPreference::None => false,
        }
    }
}

impl FromStr for DayPreference {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekdays" => Ok(DayPreference::Weekdays),
            "weekends" => Ok(DayPreference::Weekends),
            "" | "none" => Ok(DayPreference::None),
            _ => Err(SchedulingError::InvalidPreference {
                field: "day",
                value: s.to_string(),
            }),
        }
    }
}

/// Preferred time-of-day bucket.
///
/// | bucket    | range                          |
/// |-----------|--------------------------------|
/// | morning   | [06:00, 12:00)                 |
/// | afternoon | [12:00, 17:00)                 |
/// | evening   | [17:00, 21:00)                 |
/// | night     | [21:00, 24:00) ∪ [00:00, 02:00) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Afternoon,
    Evening,
    Night,
    #[default]
    None,
}

impl TimePreference {
    /// Whether `time` falls inside this bucket. `None` never matches.
    pub fn contains(self, time: NaiveTime) -> bool {
        let at = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN);
        match self {
            TimePreference::Morning => at(6) <= time && time < at(12),
            TimePreference::Afternoon => at(12) <= time && time < at(17),
            TimePreference::Evening => at(17) <= time && time < at(21),
            TimePreference::Night => time >= at(21) || time < at(2),
            TimePreference::None => false,
        }
    }
}

impl FromStr for TimePreference {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimePreference::Morning),
            "afternoon" => Ok(TimePreference::Afternoon),
            "evening" => Ok(TimePreference::Evening),
            "night" => Ok(TimePreference::Night),
            "" | "none" => Ok(TimePreference::None),
            _ => Err(SchedulingError::InvalidPreference {
                field: "time",
                value: s.to_string(),
            }),
        }
    }
}

/// A participant's free time and coarse scheduling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// Raw free intervals; overlapping or adjacent entries are allowed.
    pub availability: Vec<Interval>,
    #[serde(default)]
    pub day_preference: DayPreference,
    #[serde(default)]
    pub time_preference: TimePreference,
}

impl Participant {
    pub fn new(id: &str, availability: Vec<Interval>) -> Self {
        Self {
            id: id.to_string(),
            availability,
            day_preference: DayPreference::None,
            time_preference: TimePreference::None,
        }
    }

    pub fn with_preferences(mut self, day: DayPreference, time: TimePreference) -> Self {
        self.day_preference = day;
        self.time_preference = time;
        self
    }

    /// Validate every interval, failing on the first malformed one.
    pub fn validate(&self) -> Result<()> {
        self.availability
            .iter()
            .try_for_each(|interval| interval.validate(&self.id))
    }

    /// Points this participant awards to a window starting at `start` (0..=2).
    pub fn preference_points(&self, start: NaiveDateTime) -> u32 {
        u32::from(self.day_preference.matches(start.weekday()))
            + u32::from(self.time_preference.contains(start.time()))
    }
}

/// A fixed-duration span where every participant is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CandidateWindow {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl fmt::Display for CandidateWindow {
    /// Renders as `start~end` in ISO 8601, the form the web frontend splits on.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}~{}",
            self.start.format("%Y-%m-%dT%H:%M:%S"),
            self.end.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredWindow {
    pub window: CandidateWindow,
    pub score: u32,
}
