//! Planned shift model.
//!
//! A [`Shift`] is one planned work block for a user on a date. Shifts are
//! owned by the scheduling subsystem and are only read here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A planned work block for one user on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The user the shift is planned for.
    pub user_id: String,
    /// The organization-local calendar day the shift belongs to.
    pub date: NaiveDate,
    /// Scheduled start instant.
    pub scheduled_start: DateTime<Utc>,
    /// Scheduled end instant.
    pub scheduled_end: DateTime<Utc>,
    /// Planned unpaid break in minutes.
    #[serde(default)]
    pub break_minutes: u32,
    /// Free-text work location.
    #[serde(default)]
    pub location: String,
    /// Shift category as labelled by the scheduling subsystem.
    #[serde(default)]
    pub category: String,
}

impl Shift {
    /// Returns the planned work minutes: scheduled span minus the break.
    ///
    /// Partial minutes of the span are truncated. The result may be negative
    /// when the break is longer than the span; callers decide what that means.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::Shift;
    /// use chrono::{NaiveDate, TimeZone, Utc};
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     user_id: "u1".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     scheduled_start: Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap(),
    ///     scheduled_end: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    ///     break_minutes: 60,
    ///     location: "HQ".to_string(),
    ///     category: "day".to_string(),
    /// };
    /// assert_eq!(shift.planned_minutes(), 480);
    /// ```
    pub fn planned_minutes(&self) -> i64 {
        (self.scheduled_end - self.scheduled_start).num_minutes() - i64::from(self.break_minutes)
    }
}
