//! Day reconciliation.
//!
//! Classifies one user's day from its planned shift, its clock events and its
//! approved expense total. The decision is a pure function of its inputs,
//! including the injected `now`; calling it twice with the same inputs gives
//! identical records.
//!
//! Rules, in order:
//! - No shift: `DAY_OFF`, nothing counted, stray clock events ignored.
//! - Shift with clock-in: `WORKED`. A clock-in strictly after the scheduled
//!   start raises `LATE`. Duration follows the variant's basis: planned
//!   (schedule minus break) or actual (clock-out minus clock-in minus break,
//!   not applicable without a clock-out).
//! - Shift without clock-in: `ABSENT` once the day is before today, or is
//!   today and `now` is past the scheduled end; otherwise still `WORKED`
//!   with no duration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{
    Alert, DayRecord, DayStatus, DurationBasis, EventKind, NOT_APPLICABLE, PunchTimes,
    ReportVariant, Shift,
};

use super::calendar::{CalendarDay, LocalCalendar, format_duration};
use super::indexer::DayEvents;

/// Inputs shared by every day of a report.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    /// The organization's local calendar.
    pub calendar: &'a LocalCalendar,
    /// The report variant.
    pub variant: ReportVariant,
    /// The instant the report is generated at.
    pub now: DateTime<Utc>,
}

/// What a day contributes to the monthly summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTally {
    /// The day counts toward the work-day total.
    pub counts_as_work_day: bool,
    /// The day was classified absent.
    pub absent: bool,
    /// The clock-in was late.
    pub late: bool,
    /// The determinable work duration in minutes.
    pub work_minutes: Option<i64>,
}

/// A reconciled day: the display record and its summary contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOutcome {
    /// The classified day record.
    pub record: DayRecord,
    /// The day's contribution to the monthly summary.
    pub tally: DayTally,
}

/// Reconciles one user's day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DayStatus, ReportVariant, Shift};
/// use attendance_engine::reconciliation::{CalendarDay, DayContext, LocalCalendar, reconcile_day};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let calendar = LocalCalendar::utc();
/// let ctx = DayContext {
///     calendar: &calendar,
///     variant: ReportVariant::Full,
///     now: Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap(),
/// };
/// let day = CalendarDay {
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     weekday: "Thu".to_string(),
/// };
/// let shift = Shift {
///     id: "shift_001".to_string(),
///     user_id: "u1".to_string(),
///     date: day.date,
///     scheduled_start: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
///     scheduled_end: Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap(),
///     break_minutes: 60,
///     location: "HQ".to_string(),
///     category: "day".to_string(),
/// };
///
/// // The shift is five days in the past and nobody clocked in.
/// let outcome = reconcile_day(&ctx, &day, Some(&shift), None, Decimal::ZERO);
/// assert_eq!(outcome.record.status, DayStatus::Absent);
/// assert!(outcome.tally.absent);
/// assert!(!outcome.tally.counts_as_work_day);
/// ```
pub fn reconcile_day(
    ctx: &DayContext<'_>,
    day: &CalendarDay,
    shift: Option<&Shift>,
    events: Option<&DayEvents>,
    expense_total: Decimal,
) -> DayOutcome {
    let variant = ctx.variant;
    let expense_total = variant.includes_expenses().then_some(expense_total);

    let Some(shift) = shift else {
        return DayOutcome {
            record: DayRecord {
                date: day.date,
                weekday: day.weekday.clone(),
                status: DayStatus::DayOff,
                workplace: NOT_APPLICABLE.to_string(),
                scheduled_start: String::new(),
                scheduled_end: String::new(),
                break_time: NOT_APPLICABLE.to_string(),
                work_time: NOT_APPLICABLE.to_string(),
                punches: variant.exposes_punches().then(PunchTimes::default),
                alerts: variant.exposes_punches().then(Vec::new),
                expense_total,
            },
            tally: DayTally::default(),
        };
    };

    let event_of = |kind: EventKind| events.and_then(|events| events.get(kind));
    let mut status = DayStatus::Worked;
    let mut alerts = Vec::new();
    let mut tally = DayTally {
        counts_as_work_day: true,
        ..DayTally::default()
    };

    match event_of(EventKind::ClockIn) {
        Some(clock_in) => {
            if clock_in.timestamp > shift.scheduled_start {
                alerts.push(Alert::Late);
                tally.late = true;
            }
            let minutes = match variant.duration_basis() {
                DurationBasis::Planned => Some(shift.planned_minutes()),
                DurationBasis::Actual => event_of(EventKind::ClockOut).map(|clock_out| {
                    (clock_out.timestamp - clock_in.timestamp).num_minutes()
                        - i64::from(shift.break_minutes)
                }),
            };
            // A negative span means inconsistent punches; report it as unknown.
            tally.work_minutes = minutes.filter(|minutes| *minutes >= 0);
        }
        None => {
            if shift_window_closed(ctx, day, shift) {
                status = DayStatus::Absent;
                alerts.push(Alert::Absent);
                tally.absent = true;
                tally.counts_as_work_day = false;
            }
        }
    }

    let (scheduled_start, scheduled_end) =
        if status == DayStatus::Absent && !variant.shows_schedule_when_absent() {
            (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string())
        } else {
            (
                ctx.calendar.format_time(shift.scheduled_start),
                ctx.calendar.format_time(shift.scheduled_end),
            )
        };

    let (break_time, work_time) = if status == DayStatus::Worked {
        (
            format_duration(i64::from(shift.break_minutes)),
            tally
                .work_minutes
                .map(format_duration)
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        )
    } else {
        (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string())
    };

    let punches = variant.exposes_punches().then(|| {
        let time_of = |kind: EventKind| {
            event_of(kind).map(|event| ctx.calendar.format_time(event.timestamp))
        };
        PunchTimes {
            wake_up: time_of(EventKind::WakeUpReport),
            departure: time_of(EventKind::DepartureReport),
            clock_in: time_of(EventKind::ClockIn),
            clock_out: time_of(EventKind::ClockOut),
        }
    });

    DayOutcome {
        record: DayRecord {
            date: day.date,
            weekday: day.weekday.clone(),
            status,
            workplace: shift.location.clone(),
            scheduled_start,
            scheduled_end,
            break_time,
            work_time,
            punches,
            alerts: variant.exposes_punches().then_some(alerts),
            expense_total,
        },
        tally,
    }
}

/// Returns true once a shift without clock-in can no longer be attended.
///
/// Compares local calendar days, not instants: a past day is closed, today is
/// closed only after the scheduled end, a future day never is.
fn shift_window_closed(ctx: &DayContext<'_>, day: &CalendarDay, shift: &Shift) -> bool {
    let today = ctx.calendar.date_key(ctx.now);
    day.date < today || (day.date == today && ctx.now > shift.scheduled_end)
}
