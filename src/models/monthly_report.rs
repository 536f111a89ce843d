//! Monthly summary and report envelopes.
//!
//! A report for exactly one user is returned un-nested; a report for several
//! users is a collection keyed by user id. The two shapes are distinguished
//! on the wire by the `shape` tag.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DayRecord, ReportVariant};

/// A user a report is generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The company the user belongs to, if any.
    #[serde(default)]
    pub company_id: Option<String>,
}

/// Monthly totals for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The user these totals belong to.
    pub user: UserRef,
    /// Days counted as worked.
    pub work_days: u32,
    /// Sum of determinable work durations, in minutes.
    pub total_work_minutes: i64,
    /// `total_work_minutes` as `H:MM`.
    pub total_work_time: String,
    /// Days classified absent.
    pub absences: u32,
    /// Days with a late clock-in.
    pub late_count: u32,
    /// Sum of approved expenses over the month, for variants that include them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_expenses: Option<Decimal>,
}

/// The month of day records plus the summary for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReport {
    /// The user the report covers.
    pub user: UserRef,
    /// Calendar year.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u32,
    /// The variant the report was generated with.
    pub variant: ReportVariant,
    /// One record per calendar day, in date order.
    pub days: Vec<DayRecord>,
    /// Monthly totals.
    pub summary: MonthlySummary,
}

/// The result of a report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Report {
    /// Exactly one user was resolved.
    Single(UserReport),
    /// More than one user was resolved.
    Multi {
        /// Per-user reports keyed by user id.
        users: BTreeMap<String, UserReport>,
    },
}

impl Report {
    /// Builds the report envelope from per-user reports.
    ///
    /// One report yields [`Report::Single`]; any other count yields
    /// [`Report::Multi`].
    pub fn from_user_reports(mut reports: Vec<UserReport>) -> Self {
        if reports.len() == 1 {
            if let Some(report) = reports.pop() {
                return Report::Single(report);
            }
        }
        Report::Multi {
            users: reports
                .into_iter()
                .map(|report| (report.user.id.clone(), report))
                .collect(),
        }
    }

    /// Iterates the per-user reports regardless of shape.
    pub fn user_reports(&self) -> Box<dyn Iterator<Item = &UserReport> + '_> {
        match self {
            Report::Single(report) => Box::new(std::iter::once(report)),
            Report::Multi { users } => Box::new(users.values()),
        }
    }
}
