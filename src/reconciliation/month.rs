//! Monthly aggregation for one user.

use rust_decimal::Decimal;

use crate::models::{MonthRange, MonthlySummary, UserRef, UserReport};

use super::calendar::format_duration;
use super::day::{DayContext, DayTally, reconcile_day};
use super::indexer::RecordIndex;

/// Running monthly totals folded from day tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MonthTotals {
    work_days: u32,
    total_work_minutes: i64,
    absences: u32,
    late_count: u32,
    total_expenses: Decimal,
}

impl MonthTotals {
    fn add(&mut self, tally: &DayTally, expense_total: Decimal) {
        if tally.counts_as_work_day {
            self.work_days += 1;
        }
        if tally.absent {
            self.absences += 1;
        }
        if tally.late {
            self.late_count += 1;
        }
        self.total_work_minutes += tally.work_minutes.unwrap_or(0);
        self.total_expenses += expense_total;
    }
}

/// Reconciles every day of a month for one user and folds the summary.
///
/// Expenses are summed over every day regardless of its status, since an
/// expense may be approved for a day that ends up off or absent.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{DayStatus, MonthRange, ReportVariant, UserRef};
/// use attendance_engine::reconciliation::{DayContext, LocalCalendar, RecordIndex, aggregate_month};
/// use chrono::{TimeZone, Utc};
///
/// let calendar = LocalCalendar::utc();
/// let ctx = DayContext {
///     calendar: &calendar,
///     variant: ReportVariant::Full,
///     now: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
/// };
/// let user = UserRef { id: "u1".to_string(), name: "Aiko".to_string(), company_id: None };
/// let range = MonthRange::new(2026, 2).unwrap();
///
/// let report = aggregate_month(&ctx, &user, &range, &RecordIndex::default());
/// assert_eq!(report.days.len(), 28);
/// assert!(report.days.iter().all(|day| day.status == DayStatus::DayOff));
/// assert_eq!(report.summary.work_days, 0);
/// ```
pub fn aggregate_month(
    ctx: &DayContext<'_>,
    user: &UserRef,
    range: &MonthRange,
    index: &RecordIndex,
) -> UserReport {
    let mut totals = MonthTotals::default();
    let mut days = Vec::with_capacity(range.day_count() as usize);

    for day in ctx.calendar.days_of_month(range) {
        let expense_total = index.expense_total_of(&user.id, day.date);
        let outcome = reconcile_day(
            ctx,
            &day,
            index.shift_of(&user.id, day.date),
            index.events_of(&user.id, day.date),
            expense_total,
        );
        totals.add(&outcome.tally, expense_total);
        days.push(outcome.record);
    }

    UserReport {
        user: user.clone(),
        year: range.year,
        month: range.month,
        variant: ctx.variant,
        days,
        summary: MonthlySummary {
            user: user.clone(),
            work_days: totals.work_days,
            total_work_minutes: totals.total_work_minutes,
            total_work_time: format_duration(totals.total_work_minutes),
            absences: totals.absences,
            late_count: totals.late_count,
            total_expenses: ctx
                .variant
                .includes_expenses()
                .then_some(totals.total_expenses),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttendanceEvent, DayStatus, EventKind, ExpenseEntry, ExpenseStatus, ReportVariant, Shift,
    };
    use crate::reconciliation::LocalCalendar;
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn user() -> UserRef {
        UserRef {
            id: "u1".to_string(),
            name: "Aiko".to_string(),
            company_id: Some("acme".to_string()),
        }
    }

    fn shift(day: u32) -> Shift {
        Shift {
            id: format!("s{}", day),
            user_id: "u1".to_string(),
            date: date(day),
            scheduled_start: at(day, 9, 0),
            scheduled_end: at(day, 18, 0),
            break_minutes: 60,
            location: "HQ".to_string(),
            category: "day".to_string(),
        }
    }

    fn event(day: u32, kind: EventKind, hour: u32, minute: u32) -> AttendanceEvent {
        AttendanceEvent {
            id: format!("{:?}{}", kind, day),
            user_id: "u1".to_string(),
            kind,
            timestamp: at(day, hour, minute),
            location: None,
            corrections: vec![],
        }
    }

    fn expense(day: u32, amount: i64) -> ExpenseEntry {
        ExpenseEntry {
            id: format!("x{}", day),
            user_id: "u1".to_string(),
            date: date(day),
            amount: Decimal::new(amount, 0),
            status: ExpenseStatus::Approved,
        }
    }

    /// Jan 2026, "now" = Jan 10 12:00.
    /// - 5th: on time, clocked out (8:00 actual)
    /// - 6th: late 09:10, clocked out 18:05 (7:55 actual)
    /// - 7th: clocked in, no clock-out
    /// - 8th: no punches -> absent
    /// - 10th: no punches, shift still open -> worked, no duration
    /// - 20th: future shift -> worked, no duration
    /// - 11th: day off with expense 500; 5th also has expense 120
    fn month_index() -> RecordIndex {
        RecordIndex::build(
            &LocalCalendar::utc(),
            vec![shift(5), shift(6), shift(7), shift(8), shift(10), shift(20)],
            vec![
                event(5, EventKind::ClockIn, 9, 0),
                event(5, EventKind::ClockOut, 18, 0),
                event(6, EventKind::ClockIn, 9, 10),
                event(6, EventKind::ClockOut, 18, 5),
                event(7, EventKind::ClockIn, 8, 50),
                event(15, EventKind::ClockIn, 9, 0),
            ],
            vec![expense(11, 500), expense(5, 120)],
        )
    }

    fn run(variant: ReportVariant) -> UserReport {
        let calendar = LocalCalendar::utc();
        let ctx = DayContext {
            calendar: &calendar,
            variant,
            now: at(10, 12, 0),
        };
        let range = MonthRange::new(2026, 1).unwrap();
        aggregate_month(&ctx, &user(), &range, &month_index())
    }

    #[test]
    fn test_full_month_summary() {
        let report = run(ReportVariant::Full);

        assert_eq!(report.days.len(), 31);
        assert_eq!(report.summary.work_days, 5);
        assert_eq!(report.summary.absences, 1);
        assert_eq!(report.summary.late_count, 1);
        assert_eq!(report.summary.total_work_minutes, 480 + 475);
        assert_eq!(report.summary.total_work_time, "15:55");
        assert_eq!(report.summary.total_expenses, Some(Decimal::new(620, 0)));

        assert_eq!(report.days[7].status, DayStatus::Absent);
        assert_eq!(report.days[9].status, DayStatus::Worked);
        assert_eq!(report.days[10].status, DayStatus::DayOff);
        assert_eq!(report.days[10].expense_total, Some(Decimal::new(500, 0)));
        // Stray clock-in on the 15th without a shift.
        assert_eq!(report.days[14].status, DayStatus::DayOff);
    }

    #[test]
    fn test_planned_month_summary() {
        let report = run(ReportVariant::SubmissionBasic);

        assert_eq!(report.summary.work_days, 5);
        // 5th, 6th and 7th have a clock-in, each worth the planned 8:00.
        assert_eq!(report.summary.total_work_minutes, 3 * 480);
        assert_eq!(report.summary.total_expenses, None);
        assert!(report.days.iter().all(|day| day.expense_total.is_none()));
    }

    #[test]
    fn test_days_are_in_date_order() {
        let report = run(ReportVariant::SubmissionWithExpenses);
        let dates: Vec<NaiveDate> = report.days.iter().map(|day| day.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(report.days[0].date, date(1));
        assert_eq!(report.year, 2026);
        assert_eq!(report.month, 1);
        assert_eq!(report.variant, ReportVariant::SubmissionWithExpenses);
    }

    #[test]
    fn test_totals_ignore_other_users() {
        let calendar = LocalCalendar::utc();
        let ctx = DayContext {
            calendar: &calendar,
            variant: ReportVariant::Full,
            now: at(10, 12, 0),
        };
        let other = UserRef {
            id: "u2".to_string(),
            name: "Ben".to_string(),
            company_id: None,
        };
        let range = MonthRange::new(2026, 1).unwrap();
        let report = aggregate_month(&ctx, &other, &range, &month_index());

        assert_eq!(report.summary.work_days, 0);
        assert_eq!(report.summary.total_expenses, Some(Decimal::ZERO));
        assert_eq!(report.summary.user.id, "u2");
    }

    #[test]
    fn test_clock_in_before_utc_midnight_counts_for_local_day() {
        let tokyo = LocalCalendar::with_offset(FixedOffset::east_opt(9 * 3600).unwrap());
        // 09:00-18:00 on the 15th in Tokyo.
        let shift = Shift {
            scheduled_start: at(15, 0, 0),
            scheduled_end: at(15, 9, 0),
            ..shift(15)
        };
        // 08:55 on the 15th in Tokyo, still the 14th in UTC.
        let clock_in = AttendanceEvent {
            timestamp: at(14, 23, 55),
            ..event(14, EventKind::ClockIn, 0, 0)
        };
        let index = RecordIndex::build(&tokyo, vec![shift], vec![clock_in], vec![]);
        let ctx = DayContext {
            calendar: &tokyo,
            variant: ReportVariant::Full,
            now: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        };
        let range = MonthRange::new(2026, 1).unwrap();

        let report = aggregate_month(&ctx, &user(), &range, &index);

        let day = &report.days[14];
        assert_eq!(day.date, date(15));
        assert_eq!(day.status, DayStatus::Worked);
        assert_eq!(
            day.punches.as_ref().unwrap().clock_in.as_deref(),
            Some("08:55")
        );
        assert_eq!(report.days[13].status, DayStatus::DayOff);
        assert_eq!(report.summary.absences, 0);
        assert_eq!(report.summary.late_count, 0);
        assert_eq!(report.summary.work_days, 1);
    }
}
