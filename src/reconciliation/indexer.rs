//! Per-user, per-day lookup over batched record fetches.
//!
//! The index is built once per report from the three batched fetches and
//! shared, read-only, by every per-user aggregation. Construction is a single
//! pass over each input list.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AttendanceEvent, EventKind, ExpenseEntry, Shift};

use super::calendar::LocalCalendar;

/// The clock events of one user on one day, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayEvents {
    by_kind: BTreeMap<EventKind, AttendanceEvent>,
}

impl DayEvents {
    /// Returns the event of the given kind, if one was recorded.
    pub fn get(&self, kind: EventKind) -> Option<&AttendanceEvent> {
        self.by_kind.get(&kind)
    }

    /// Keeps the first event seen for a kind; later duplicates are ignored.
    fn insert_first(&mut self, event: AttendanceEvent) {
        self.by_kind.entry(event.kind).or_insert(event);
    }
}

impl FromIterator<AttendanceEvent> for DayEvents {
    fn from_iter<I: IntoIterator<Item = AttendanceEvent>>(iter: I) -> Self {
        let mut events = DayEvents::default();
        for event in iter {
            events.insert_first(event);
        }
        events
    }
}

/// Lookup maps from `(user id, local date)` to shift, events and expense total.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{ExpenseEntry, ExpenseStatus};
/// use attendance_engine::reconciliation::{LocalCalendar, RecordIndex};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let expense = |id: &str, cents: i64| ExpenseEntry {
///     id: id.to_string(),
///     user_id: "u1".to_string(),
///     date,
///     amount: Decimal::new(cents, 2),
///     status: ExpenseStatus::Approved,
/// };
///
/// let index = RecordIndex::build(
///     &LocalCalendar::utc(),
///     vec![],
///     vec![],
///     vec![expense("a", 1000), expense("b", 250)],
/// );
/// assert_eq!(index.expense_total_of("u1", date), Decimal::new(1250, 2));
/// assert!(index.shift_of("u1", date).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    shifts: HashMap<String, HashMap<NaiveDate, Shift>>,
    events: HashMap<String, HashMap<NaiveDate, DayEvents>>,
    expenses: HashMap<String, HashMap<NaiveDate, Decimal>>,
}

impl RecordIndex {
    /// Builds the index in one pass over each list.
    ///
    /// Shifts and expenses are keyed by their own `date`. Events are keyed by
    /// the date of their timestamp in `calendar`, never by the UTC date.
    ///
    /// Input order is taken as creation order: for a duplicated shift
    /// `(user, date)` or event `(user, date, kind)` the first one wins.
    /// Expense entries that are not approved are skipped; approved entries
    /// on the same day are summed.
    pub fn build(
        calendar: &LocalCalendar,
        shifts: Vec<Shift>,
        events: Vec<AttendanceEvent>,
        expenses: Vec<ExpenseEntry>,
    ) -> Self {
        let mut index = RecordIndex::default();

        for shift in shifts {
            index
                .shifts
                .entry(shift.user_id.clone())
                .or_default()
                .entry(shift.date)
                .or_insert(shift);
        }

        for event in events {
            let date = calendar.date_key(event.timestamp);
            index
                .events
                .entry(event.user_id.clone())
                .or_default()
                .entry(date)
                .or_default()
                .insert_first(event);
        }

        for entry in expenses.into_iter().filter(ExpenseEntry::is_approved) {
            *index
                .expenses
                .entry(entry.user_id)
                .or_default()
                .entry(entry.date)
                .or_default() += entry.amount;
        }

        index
    }

    /// Returns the shift planned for a user on a day.
    pub fn shift_of(&self, user_id: &str, date: NaiveDate) -> Option<&Shift> {
        self.shifts.get(user_id)?.get(&date)
    }

    /// Returns the clock events of a user on a day.
    pub fn events_of(&self, user_id: &str, date: NaiveDate) -> Option<&DayEvents> {
        self.events.get(user_id)?.get(&date)
    }

    /// Returns the approved expense total of a user on a day (zero if none).
    pub fn expense_total_of(&self, user_id: &str, date: NaiveDate) -> Decimal {
        self.expenses
            .get(user_id)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the number of indexed shifts.
    pub fn shift_count(&self) -> usize {
        self.shifts.values().map(HashMap::len).sum()
    }

    /// Returns the number of indexed `(user, day)` event groups.
    pub fn event_day_count(&self) -> usize {
        self.events.values().map(HashMap::len).sum()
    }

    /// Returns the number of `(user, day)` pairs with an approved expense.
    pub fn expense_day_count(&self) -> usize {
        self.expenses.values().map(HashMap::len).sum()
    }
}
