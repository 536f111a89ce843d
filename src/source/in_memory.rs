//! In-memory collaborator adapter.
//!
//! Serves every fetch with one filter pass over its records and counts the
//! calls per stream. Loaded from seed JSON by the binary and used directly by
//! tests and benchmarks.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, CompanyRef, ExpenseEntry, MonthRange, ReportScope, Requester, Shift, UserRef,
};

use super::{RecordSource, SourceError, UserDirectory};

/// Records an [`InMemoryStore`] is created from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Known users.
    #[serde(default)]
    pub users: Vec<UserRef>,
    /// User ids allowed to request the all-users scope.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Planned shifts.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Clock events, in creation order.
    #[serde(default)]
    pub attendance_events: Vec<AttendanceEvent>,
    /// Expense entries in any review state.
    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
}

/// Number of fetch calls served per stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchCounts {
    /// Calls to `fetch_shifts`.
    pub shifts: usize,
    /// Calls to `fetch_attendance_events`.
    pub attendance_events: usize,
    /// Calls to `fetch_approved_expenses`.
    pub expenses: usize,
}

impl FetchCounts {
    /// Returns the total number of fetch calls.
    pub fn total(&self) -> usize {
        self.shifts + self.attendance_events + self.expenses
    }
}

/// A [`RecordSource`] and [`UserDirectory`] over in-memory records.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: SeedData,
    shift_fetches: AtomicUsize,
    event_fetches: AtomicUsize,
    expense_fetches: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryStore {
    /// Creates a store over the given records.
    pub fn new(data: SeedData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Loads seed records from a JSON file.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;
        let data = serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })?;

        Ok(Self::new(data))
    }

    /// Returns the fetch calls served so far.
    pub fn fetch_counts(&self) -> FetchCounts {
        FetchCounts {
            shifts: self.shift_fetches.load(Ordering::SeqCst),
            attendance_events: self.event_fetches.load(Ordering::SeqCst),
            expenses: self.expense_fetches.load(Ordering::SeqCst),
        }
    }

    /// Makes every subsequent fetch fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self, counter: &AtomicUsize) -> Result<(), SourceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable(
                "in-memory store is set to fail".to_string(),
            ));
        }
        Ok(())
    }

    fn users_where(&self, predicate: impl Fn(&UserRef) -> bool) -> Vec<UserRef> {
        self.data
            .users
            .iter()
            .filter(|user| predicate(user))
            .cloned()
            .collect()
    }
}

/// Keeps the records of the given users that `key` marks as in the month.
fn select<T: Clone>(
    records: &[T],
    user_ids: &[String],
    key: impl Fn(&T) -> (&str, bool),
) -> Vec<T> {
    let wanted: HashSet<&str> = user_ids.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|record| {
            let (user_id, in_month) = key(record);
            in_month && wanted.contains(user_id)
        })
        .cloned()
        .collect()
}

#[async_trait]
impl RecordSource for InMemoryStore {
    async fn fetch_shifts(
        &self,
        user_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<Shift>, SourceError> {
        self.check_available(&self.shift_fetches)?;
        Ok(select(&self.data.shifts, user_ids, |shift| {
            (shift.user_id.as_str(), range.contains(shift.date))
        }))
    }

    async fn fetch_attendance_events(
        &self,
        user_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<AttendanceEvent>, SourceError> {
        self.check_available(&self.event_fetches)?;
        Ok(select(&self.data.attendance_events, user_ids, |event| {
            (event.user_id.as_str(), range.covers_instant(event.timestamp))
        }))
    }

    async fn fetch_approved_expenses(
        &self,
        user_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<ExpenseEntry>, SourceError> {
        self.check_available(&self.expense_fetches)?;
        let mut entries = select(&self.data.expenses, user_ids, |entry| {
            (entry.user_id.as_str(), range.contains(entry.date))
        });
        entries.retain(ExpenseEntry::is_approved);
        Ok(entries)
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn resolve(
        &self,
        requester: &Requester,
        scope: &ReportScope,
    ) -> Result<Vec<UserRef>, SourceError> {
        match scope {
            ReportScope::Users { user_ids } => {
                let mut seen = HashSet::new();
                let mut users = Vec::new();
                for id in user_ids {
                    if !seen.insert(id.as_str()) {
                        continue;
                    }
                    if let Some(user) = self.data.users.iter().find(|user| &user.id == id) {
                        users.push(user.clone());
                    }
                }
                Ok(users)
            }
            ReportScope::Company { company } => {
                let company_id = match company {
                    Some(CompanyRef::Own) => requester.company_id.as_deref(),
                    Some(CompanyRef::Partner(id)) => Some(id.as_str()),
                    None => None,
                };
                Ok(match company_id {
                    Some(company_id) => {
                        self.users_where(|user| user.company_id.as_deref() == Some(company_id))
                    }
                    None => Vec::new(),
                })
            }
            ReportScope::All => {
                if !self.data.admins.contains(&requester.user_id) {
                    return Err(SourceError::Forbidden(format!(
                        "user '{}' may not report on all users",
                        requester.user_id
                    )));
                }
                Ok(self.data.users.clone())
            }
        }
    }
}
