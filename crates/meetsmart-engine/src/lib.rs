//! # meetsmart-engine
//!
//! Finds a common meeting time for a group from each participant's free
//! intervals and coarse day/time preferences.
//!
//! The engine is a pure function of its inputs: no I/O, no shared state, no
//! time-zone handling. Callers pass availability already normalized to one
//! zone and receive every tied best window back.
//!
//! ## Modules
//!
//! - [`model`] — intervals, participants, preferences, candidate windows
//! - [`intersect`] — windows where every participant is free
//! - [`score`] — preference scoring and best-window selection
//! - [`event`] — event date range, duration and participation rate
//! - [`request`] — JSON request/response format used by the CLI and WASM
//! - [`error`] — Error types

pub mod error;
pub mod event;
pub mod intersect;
pub mod model;
pub mod request;
pub mod score;

pub use error::SchedulingError;
pub use event::Event;
pub use intersect::{find_common_windows, find_common_windows_with_step, SLOT_STEP_MINUTES};
pub use model::{
    CandidateWindow, DayPreference, Interval, Participant, ScoredWindow, TimePreference,
};
pub use request::{compute_best_times, compute_common_windows, BestTimesResponse};
pub use score::{find_best_times, score_window, score_windows, select_best};
