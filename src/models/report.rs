//! Report request models: scope, variant, month range and requester.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Which company a company-scoped report covers.
///
/// On the wire this is a plain string: `"self"` names the requester's own
/// company, anything else is a partner company id.
///
/// # Example
///
/// ```
/// use attendance_engine::models::CompanyRef;
///
/// let own: CompanyRef = serde_json::from_str("\"self\"").unwrap();
/// assert_eq!(own, CompanyRef::Own);
///
/// let partner: CompanyRef = serde_json::from_str("\"acme\"").unwrap();
/// assert_eq!(partner, CompanyRef::Partner("acme".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyRef {
    /// The requester's own company.
    Own,
    /// A partner company by id.
    Partner(String),
}

impl From<String> for CompanyRef {
    fn from(value: String) -> Self {
        if value == "self" {
            CompanyRef::Own
        } else {
            CompanyRef::Partner(value)
        }
    }
}

impl From<CompanyRef> for String {
    fn from(value: CompanyRef) -> Self {
        match value {
            CompanyRef::Own => "self".to_string(),
            CompanyRef::Partner(id) => id,
        }
    }
}

/// The set of users a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportScope {
    /// One or more explicit users.
    Users {
        /// The requested user ids.
        #[serde(default)]
        user_ids: Vec<String>,
    },
    /// Every user belonging to a company.
    Company {
        /// The company, or `None` if the caller omitted it.
        #[serde(default)]
        company: Option<CompanyRef>,
    },
    /// Every user.
    All,
}

impl ReportScope {
    /// Checks that the scope carries the parameters it needs.
    ///
    /// Runs before any fetch. An empty user list or a missing/blank company
    /// id yields [`EngineError::InvalidScope`].
    pub fn validate(&self) -> EngineResult<()> {
        match self {
            ReportScope::Users { user_ids } => {
                if user_ids.iter().all(|id| id.trim().is_empty()) {
                    return Err(EngineError::InvalidScope {
                        message: "users scope requires at least one user id".to_string(),
                    });
                }
                Ok(())
            }
            ReportScope::Company { company } => match company {
                None => Err(EngineError::InvalidScope {
                    message: "company scope requires a company id or \"self\"".to_string(),
                }),
                Some(CompanyRef::Partner(id)) if id.trim().is_empty() => {
                    Err(EngineError::InvalidScope {
                        message: "company id must not be blank".to_string(),
                    })
                }
                Some(_) => Ok(()),
            },
            ReportScope::All => Ok(()),
        }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportScope::Users { user_ids } => write!(f, "users({})", user_ids.join(",")),
            ReportScope::Company { company: None } => write!(f, "company(?)"),
            ReportScope::Company {
                company: Some(CompanyRef::Own),
            } => write!(f, "company(self)"),
            ReportScope::Company {
                company: Some(CompanyRef::Partner(id)),
            } => write!(f, "company({})", id),
            ReportScope::All => write!(f, "all"),
        }
    }
}

/// How a worked day's duration is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBasis {
    /// Scheduled end minus scheduled start, minus break.
    Planned,
    /// Clock-out minus clock-in, minus break.
    Actual,
}

/// The report flavor.
///
/// The variant alone decides the time basis and which fields a
/// [`DayRecord`](super::DayRecord) exposes; every accessor below matches
/// exhaustively so a new variant must state its choice for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    /// Internal full report: actual basis, punches, alerts, expenses.
    Full,
    /// Submission report without expenses.
    SubmissionBasic,
    /// Submission report with per-day expenses.
    SubmissionWithExpenses,
}

impl ReportVariant {
    /// Returns the duration basis for worked days.
    pub fn duration_basis(self) -> DurationBasis {
        match self {
            ReportVariant::Full => DurationBasis::Actual,
            ReportVariant::SubmissionBasic | ReportVariant::SubmissionWithExpenses => {
                DurationBasis::Planned
            }
        }
    }

    /// Returns true if raw punch times and alerts are exposed.
    pub fn exposes_punches(self) -> bool {
        match self {
            ReportVariant::Full => true,
            ReportVariant::SubmissionBasic | ReportVariant::SubmissionWithExpenses => false,
        }
    }

    /// Returns true if per-day and monthly expense totals are included.
    pub fn includes_expenses(self) -> bool {
        match self {
            ReportVariant::Full | ReportVariant::SubmissionWithExpenses => true,
            ReportVariant::SubmissionBasic => false,
        }
    }

    /// Returns true if an absent day still shows its scheduled times.
    pub fn shows_schedule_when_absent(self) -> bool {
        match self {
            ReportVariant::Full => true,
            ReportVariant::SubmissionBasic | ReportVariant::SubmissionWithExpenses => false,
        }
    }
}

/// A calendar month with its first and last day resolved.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthRange;
///
/// let feb = MonthRange::new(2024, 2).unwrap();
/// assert_eq!(feb.day_count(), 29);
/// assert!(MonthRange::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    /// Calendar year.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u32,
    /// First day of the month.
    pub first_day: NaiveDate,
    /// Last day of the month.
    pub last_day: NaiveDate,
}

impl MonthRange {
    /// Resolves a year/month pair, failing with [`EngineError::InvalidMonth`]
    /// when it does not name a representable month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidMonth { year, month };
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last_day = next_first.pred_opt().ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// Returns the number of days in the month.
    pub fn day_count(&self) -> u32 {
        self.last_day.day()
    }

    /// Checks if a date falls within the month (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Checks if an instant can fall on a local day of the month under some
    /// UTC offset, i.e. its UTC date is within one day of the month.
    pub fn covers_instant(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        let from = self.first_day.pred_opt().map_or(true, |day| date >= day);
        let to = self.last_day.succ_opt().map_or(true, |day| date <= day);
        from && to
    }
}

/// The already-authenticated user asking for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// The requester's user id.
    pub user_id: String,
    /// The requester's company, used to resolve `company: "self"`.
    #[serde(default)]
    pub company_id: Option<String>,
}
