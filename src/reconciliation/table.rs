//! Variant-driven tabular projection of a user report.
//!
//! Spreadsheet, CSV and PDF renderers all map the same table: the column set
//! depends only on the report variant, never on the output format.

use serde::{Deserialize, Serialize};

use crate::models::{Alert, DayRecord, DayStatus, MonthlySummary, ReportVariant, UserReport};

const COMMON_COLUMNS: [&str; 8] = [
    "Date",
    "Weekday",
    "Status",
    "Workplace",
    "Start",
    "End",
    "Break",
    "Work time",
];

const PUNCH_COLUMNS: [&str; 5] = ["Wake-up", "Departure", "Clock-in", "Clock-out", "Alerts"];

const EXPENSE_COLUMN: &str = "Expenses";

/// Returns the column headers for a variant.
pub fn columns_for(variant: ReportVariant) -> Vec<String> {
    let mut columns: Vec<String> = COMMON_COLUMNS.iter().map(|c| c.to_string()).collect();
    if variant.exposes_punches() {
        columns.extend(PUNCH_COLUMNS.iter().map(|c| c.to_string()));
    }
    if variant.includes_expenses() {
        columns.push(EXPENSE_COLUMN.to_string());
    }
    columns
}

fn status_label(status: DayStatus) -> &'static str {
    match status {
        DayStatus::DayOff => "Day off",
        DayStatus::Worked => "Worked",
        DayStatus::Absent => "Absent",
    }
}

fn alert_label(alert: Alert) -> &'static str {
    match alert {
        Alert::Late => "Late",
        Alert::Absent => "Absent",
    }
}

/// A user's month as display rows plus the monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    /// The user id the table belongs to.
    pub user_id: String,
    /// The user's display name.
    pub user_name: String,
    /// Column headers.
    pub columns: Vec<String>,
    /// One row per day, each with `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
    /// Monthly totals, rendered below the table.
    pub summary: MonthlySummary,
}

impl ReportTable {
    /// Projects a user report onto the column set of its variant.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{MonthRange, ReportVariant, UserRef};
    /// use attendance_engine::reconciliation::{
    ///     DayContext, LocalCalendar, RecordIndex, ReportTable, aggregate_month,
    /// };
    /// use chrono::{TimeZone, Utc};
    ///
    /// let calendar = LocalCalendar::utc();
    /// let ctx = DayContext {
    ///     calendar: &calendar,
    ///     variant: ReportVariant::SubmissionBasic,
    ///     now: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
    /// };
    /// let user = UserRef { id: "u1".to_string(), name: "Aiko".to_string(), company_id: None };
    /// let report = aggregate_month(&ctx, &user, &MonthRange::new(2026, 2).unwrap(), &RecordIndex::default());
    ///
    /// let table = ReportTable::from_user_report(&report);
    /// assert_eq!(table.columns.len(), 8);
    /// assert_eq!(table.rows.len(), 28);
    /// assert_eq!(table.rows[0][2], "Day off");
    /// ```
    pub fn from_user_report(report: &UserReport) -> Self {
        let variant = report.variant;
        Self {
            user_id: report.user.id.clone(),
            user_name: report.user.name.clone(),
            columns: columns_for(variant),
            rows: report.days.iter().map(|day| row(day, variant)).collect(),
            summary: report.summary.clone(),
        }
    }
}

fn row(day: &DayRecord, variant: ReportVariant) -> Vec<String> {
    let mut cells = vec![
        day.date.format("%Y-%m-%d").to_string(),
        day.weekday.clone(),
        status_label(day.status).to_string(),
        day.workplace.clone(),
        day.scheduled_start.clone(),
        day.scheduled_end.clone(),
        day.break_time.clone(),
        day.work_time.clone(),
    ];

    if variant.exposes_punches() {
        let punches = day.punches.clone().unwrap_or_default();
        cells.extend([
            punches.wake_up.unwrap_or_default(),
            punches.departure.unwrap_or_default(),
            punches.clock_in.unwrap_or_default(),
            punches.clock_out.unwrap_or_default(),
            day.alerts
                .iter()
                .flatten()
                .map(|alert| alert_label(*alert))
                .collect::<Vec<_>>()
                .join(", "),
        ]);
    }

    if variant.includes_expenses() {
        cells.push(
            day.expense_total
                .map(|amount| amount.normalize().to_string())
                .unwrap_or_default(),
        );
    }

    cells
}
