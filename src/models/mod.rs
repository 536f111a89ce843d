//! Core data models for the Attendance Engine.
//!
//! Source records ([`Shift`], [`AttendanceEvent`], [`ExpenseEntry`]) are
//! created outside the engine and only read here. [`DayRecord`] and
//! [`MonthlySummary`] are derived fresh for every report request.

mod attendance;
mod day_record;
mod expense;
mod monthly_report;
mod report;
mod shift;

pub use attendance::{AttendanceEvent, Correction, EventKind, GeoPoint};
pub use day_record::{Alert, DayRecord, DayStatus, NOT_APPLICABLE, PunchTimes};
pub use expense::{ExpenseEntry, ExpenseStatus};
pub use monthly_report::{MonthlySummary, Report, UserRef, UserReport};
pub use report::{CompanyRef, DurationBasis, MonthRange, ReportScope, ReportVariant, Requester};
pub use shift::Shift;
