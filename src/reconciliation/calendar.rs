//! Organization-local calendar handling.
//!
//! Every date key and display time is derived in the organization's local
//! offset, never from the raw UTC instant, so a clock-in at 23:50 local stays
//! on its local day.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::models::MonthRange;

/// Weekday labels used when none are configured, indexed from Sunday.
pub const DEFAULT_WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day of a month paired with its weekday label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The local calendar date.
    pub date: NaiveDate,
    /// The localized weekday label.
    pub weekday: String,
}

/// The organization's local calendar: a fixed UTC offset plus weekday labels.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::LocalCalendar;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
///
/// let calendar = LocalCalendar::with_offset(FixedOffset::east_opt(9 * 3600).unwrap());
///
/// // 2026-01-14T15:30Z is already 00:30 on the 15th in UTC+9.
/// let instant = Utc.with_ymd_and_hms(2026, 1, 14, 15, 30, 0).unwrap();
/// assert_eq!(calendar.date_key(instant), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// assert_eq!(calendar.format_time(instant), "00:30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCalendar {
    offset: FixedOffset,
    weekday_labels: [String; 7],
}

impl LocalCalendar {
    /// Creates a calendar with explicit weekday labels (index 0 = Sunday).
    pub fn new(offset: FixedOffset, weekday_labels: [String; 7]) -> Self {
        Self {
            offset,
            weekday_labels,
        }
    }

    /// Creates a calendar with the default English weekday labels.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self::new(offset, DEFAULT_WEEKDAY_LABELS.map(str::to_string))
    }

    /// Creates a UTC calendar with the default weekday labels.
    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    /// Returns the organization's UTC offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the local calendar day an instant falls on.
    pub fn date_key(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Formats an instant as local `HH:MM`.
    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant.with_timezone(&self.offset).format("%H:%M").to_string()
    }

    /// Returns the weekday label for a date.
    pub fn weekday_label(&self, date: NaiveDate) -> &str {
        &self.weekday_labels[date.weekday().num_days_from_sunday() as usize]
    }

    /// Enumerates every day of a month in order, with weekday labels.
    ///
    /// Produces exactly as many entries as the month has days.
    pub fn days_of_month(&self, range: &MonthRange) -> Vec<CalendarDay> {
        range
            .first_day
            .iter_days()
            .take_while(|date| *date <= range.last_day)
            .map(|date| CalendarDay {
                date,
                weekday: self.weekday_label(date).to_string(),
            })
            .collect()
    }
}

/// Formats a minute count as `H:MM`, flooring to whole minutes.
///
/// # Example
///
/// ```
/// use attendance_engine::reconciliation::format_duration;
///
/// assert_eq!(format_duration(475), "7:55");
/// assert_eq!(format_duration(60), "1:00");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(minutes: i64) -> String {
    format!("{}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tokyo() -> LocalCalendar {
        LocalCalendar::with_offset(FixedOffset::east_opt(9 * 3600).unwrap())
    }

    #[test]
    fn test_days_of_month_counts() {
        let calendar = LocalCalendar::utc();
        for (year, month, expected) in [(2026, 1, 31), (2026, 2, 28), (2024, 2, 29), (2026, 9, 30)] {
            let range = MonthRange::new(year, month).unwrap();
            let days = calendar.days_of_month(&range);
            assert_eq!(days.len(), expected, "{}-{}", year, month);
            assert_eq!(days.first().unwrap().date, range.first_day);
            assert_eq!(days.last().unwrap().date, range.last_day);
        }
    }

    #[test]
    fn test_weekday_labels_indexed_from_sunday() {
        let calendar = LocalCalendar::utc();
        let range = MonthRange::new(2026, 2).unwrap();
        let days = calendar.days_of_month(&range);
        // 2026-02-01 is a Sunday
        assert_eq!(days[0].weekday, "Sun");
        assert_eq!(days[6].weekday, "Sat");
        assert_eq!(days[7].weekday, "Sun");
    }

    #[test]
    fn test_custom_weekday_labels() {
        let labels = ["日", "月", "火", "水", "木", "金", "土"].map(str::to_string);
        let calendar = LocalCalendar::new(FixedOffset::east_opt(9 * 3600).unwrap(), labels);
        let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(calendar.weekday_label(thursday), "木");
    }

    #[test]
    fn test_date_key_uses_local_offset_near_midnight() {
        let calendar = tokyo();
        let before_local_midnight = Utc.with_ymd_and_hms(2026, 1, 15, 14, 59, 0).unwrap();
        let after_local_midnight = Utc.with_ymd_and_hms(2026, 1, 15, 15, 0, 0).unwrap();
        assert_eq!(
            calendar.date_key(before_local_midnight),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
        );
        assert_eq!(
            calendar.date_key(after_local_midnight),
            NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
        );
    }

    #[test]
    fn test_format_time_is_local() {
        let calendar = tokyo();
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 0, 10, 0).unwrap();
        assert_eq!(calendar.format_time(instant), "09:10");
    }

    #[test]
    fn test_format_duration_floors() {
        assert_eq!(format_duration(480), "8:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(601), "10:01");
    }
}
