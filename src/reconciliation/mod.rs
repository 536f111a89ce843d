//! Attendance reconciliation and reporting.
//!
//! This module contains the calendar enumeration in the organization's local
//! offset, the per-user/per-day record index built from batched fetches, the
//! day reconciler that classifies each day as worked, absent or off, the
//! monthly aggregation, the scope aggregation that drives a whole report, and
//! the variant-driven tabular projection handed to renderers.

mod calendar;
mod day;
mod indexer;
mod month;
mod scope;
mod table;

pub use calendar::{CalendarDay, DEFAULT_WEEKDAY_LABELS, LocalCalendar, format_duration};
pub use day::{DayContext, DayOutcome, DayTally, reconcile_day};
pub use indexer::{DayEvents, RecordIndex};
pub use month::aggregate_month;
pub use scope::{ReportRequest, generate_report};
pub use table::{ReportTable, columns_for};
