//! The reconciled, classified result for one user on one day.
//!
//! A [`DayRecord`] carries display strings rather than instants; it is the
//! neutral row shape every renderer maps to columns.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placeholder shown where a value does not apply.
pub const NOT_APPLICABLE: &str = "-";

/// Classification of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    /// No shift planned.
    DayOff,
    /// Shift planned and either clocked in or not yet conclusively missed.
    Worked,
    /// Shift planned, never clocked in, and the shift window has passed.
    Absent,
}

/// An alert raised on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alert {
    /// Clock-in strictly after the scheduled start.
    Late,
    /// No clock-in for a shift whose window has passed.
    Absent,
}

/// Local `HH:MM` display times of the raw clock events of a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchTimes {
    /// Wake-up report time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_up: Option<String>,
    /// Departure report time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    /// Clock-in time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<String>,
    /// Clock-out time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<String>,
}

/// One classified day for one user.
///
/// `punches` and `alerts` are present only for the full variant;
/// `expense_total` only for variants that include expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The organization-local calendar day.
    pub date: NaiveDate,
    /// Localized weekday label.
    pub weekday: String,
    /// Day classification.
    pub status: DayStatus,
    /// Work location, or `-` on a day off.
    pub workplace: String,
    /// Scheduled start as local `HH:MM`, empty on a day off.
    pub scheduled_start: String,
    /// Scheduled end as local `HH:MM`, empty on a day off.
    pub scheduled_end: String,
    /// Break as `H:MM`, or `-` unless worked.
    pub break_time: String,
    /// Work duration as `H:MM`, or `-` when not applicable.
    pub work_time: String,
    /// Raw clock event times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punches: Option<PunchTimes>,
    /// Alerts raised for the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<Alert>>,
    /// Sum of approved expenses on the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_total: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_off() -> DayRecord {
        DayRecord {
            date: NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(),
            weekday: "Sun".to_string(),
            status: DayStatus::DayOff,
            workplace: NOT_APPLICABLE.to_string(),
            scheduled_start: String::new(),
            scheduled_end: String::new(),
            break_time: NOT_APPLICABLE.to_string(),
            work_time: NOT_APPLICABLE.to_string(),
            punches: None,
            alerts: None,
            expense_total: None,
        }
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(day_off()).unwrap();
        assert_eq!(json["status"], "DAY_OFF");
        assert!(json.get("punches").is_none());
        assert!(json.get("alerts").is_none());
        assert!(json.get("expense_total").is_none());
    }

    #[test]
    fn test_expense_and_alerts_are_serialized_when_present() {
        let mut record = day_off();
        record.alerts = Some(vec![Alert::Late]);
        record.expense_total = Some(Decimal::new(500, 0));
        record.punches = Some(PunchTimes {
            clock_in: Some("09:10".to_string()),
            ..PunchTimes::default()
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["alerts"][0], "LATE");
        assert_eq!(json["expense_total"], "500");
        assert_eq!(json["punches"]["clock_in"], "09:10");
        assert!(json["punches"].get("clock_out").is_none());
    }
}
