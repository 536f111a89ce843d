//! Raw clock event model.
//!
//! An [`AttendanceEvent`] is one clock action recorded for a user. The day it
//! belongs to is the organization-local date of its `timestamp`, which
//! already reflects the latest accepted correction; the correction history is
//! carried for display only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of clock action an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// The user reported being awake.
    WakeUpReport,
    /// The user reported leaving for work.
    DepartureReport,
    /// The user started work.
    ClockIn,
    /// The user finished work.
    ClockOut,
}

/// A geolocation attached to a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// One entry in an event's correction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// The timestamp before this correction was applied.
    pub previous_timestamp: DateTime<Utc>,
    /// When the correction was made.
    pub corrected_at: DateTime<Utc>,
    /// Who made the correction.
    #[serde(default)]
    pub corrected_by: Option<String>,
    /// Why the correction was made.
    #[serde(default)]
    pub reason: Option<String>,
}

/// A single clock record for one user and kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// The user who clocked.
    pub user_id: String,
    /// The kind of clock action.
    pub kind: EventKind,
    /// The current (possibly corrected) instant of the action.
    pub timestamp: DateTime<Utc>,
    /// Where the action was recorded, if known.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Audit trail of corrections, oldest first.
    #[serde(default)]
    pub corrections: Vec<Correction>,
}
