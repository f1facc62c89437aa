//! JSON wire format shared by the CLI and the WASM bindings.
//!
//! Field names follow the web API payloads: events carry `duration` and
//! `participants_count`, responses carry `availability` slots with
//! `date`/`startTime`/`endTime` strings plus `preference_day` and
//! `preference_time`. Unknown fields are ignored.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::event::Event;
use crate::model::{
    CandidateWindow, DayPreference, Interval, Participant, ScoredWindow, TimePreference,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    /// Meeting length in minutes.
    pub duration: i64,
    pub participants_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotRecord {
    pub date: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseRecord {
    pub name: String,
    #[serde(default)]
    pub availability: Vec<SlotRecord>,
    #[serde(default)]
    pub preference_day: Option<String>,
    #[serde(default)]
    pub preference_time: Option<String>,
}

/// An event together with every response collected for it.
#[derive(Debug, Clone, Deserialize)]
pub struct BestTimeRequest {
    pub event: EventRecord,
    #[serde(default)]
    pub responses: Vec<ResponseRecord>,
}

impl BestTimeRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert the raw records into validated engine inputs.
    pub fn into_parts(self) -> Result<(Event, Vec<Participant>)> {
        let event = self.event.into_event()?;
        let participants = self
            .responses
            .into_iter()
            .map(ResponseRecord::into_participant)
            .collect::<Result<Vec<_>>>()?;
        Ok((event, participants))
    }
}

impl EventRecord {
    fn into_event(self) -> Result<Event> {
        let event = Event {
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            name: self.name,
            duration_minutes: self.duration,
            participants_count: self.participants_count,
        };
        event.validate()?;
        Ok(event)
    }
}

impl ResponseRecord {
    fn into_participant(self) -> Result<Participant> {
        let day_preference: DayPreference =
            self.preference_day.as_deref().unwrap_or_default().parse()?;
        let time_preference: TimePreference =
            self.preference_time.as_deref().unwrap_or_default().parse()?;
        let availability = self
            .availability
            .iter()
            .map(|slot| -> Result<Interval> {
                let interval = Interval {
                    date: parse_date(&slot.date)?,
                    start: parse_time(&slot.start_time)?,
                    end: parse_time(&slot.end_time)?,
                };
                interval.validate(&self.name)?;
                Ok(interval)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Participant::new(&self.name, availability)
            .with_preferences(day_preference, time_preference))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| SchedulingError::InvalidTimestamp(format!("date '{}': {}", s, e)))
}

/// Accepts `HH:MM:SS` (as stored by the API) or `HH:MM`.
fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| SchedulingError::InvalidTimestamp(format!("time '{}': {}", s, e)))
}

/// One best time as the frontend renders it: `"start~end"` plus its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTimeDto {
    pub time: String,
    pub score: u32,
}

impl From<&ScoredWindow> for BestTimeDto {
    fn from(s: &ScoredWindow) -> Self {
        Self {
            time: s.window.to_string(),
            score: s.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTimesResponse {
    pub best_times: Vec<BestTimeDto>,
    pub response_count: usize,
    pub participation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDto {
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
}

impl From<&CandidateWindow> for WindowDto {
    fn from(w: &CandidateWindow) -> Self {
        Self {
            start: w.start.format(DATETIME_FORMAT).to_string(),
            end: w.end.format(DATETIME_FORMAT).to_string(),
            duration_minutes: w.duration_minutes(),
        }
    }
}

/// Parse a request and compute the tied best times for its event.
pub fn compute_best_times(json: &str, step_minutes: i64) -> Result<BestTimesResponse> {
    let (event, participants) = BestTimeRequest::from_json(json)?.into_parts()?;
    let best = event.find_best_times_with_step(&participants, step_minutes)?;
    Ok(BestTimesResponse {
        best_times: best.iter().map(BestTimeDto::from).collect(),
        response_count: participants.len(),
        participation_rate: event.participation_rate(participants.len()),
    })
}

/// Parse a request and list every common window for its event, unscored.
pub fn compute_common_windows(json: &str, step_minutes: i64) -> Result<Vec<WindowDto>> {
    let (event, participants) = BestTimeRequest::from_json(json)?.into_parts()?;
    let windows = event.find_common_windows_with_step(&participants, step_minutes)?;
    Ok(windows.iter().map(WindowDto::from).collect())
}
