//! Scope aggregation: from a report request to a finished report.
//!
//! The scope is validated before anything is fetched. Resolved users are
//! deduplicated by id, keeping the first. Records for all target users are
//! then fetched with exactly one call per stream, and every fetch
//! must succeed before any user is reconciled. One [`RecordIndex`] is shared
//! by all per-user aggregations.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthRange, Report, ReportScope, ReportVariant, Requester, UserRef};
use crate::source::{RecordSource, SourceError, UserDirectory};

use super::calendar::LocalCalendar;
use super::day::DayContext;
use super::indexer::RecordIndex;
use super::month::aggregate_month;

/// A fully parsed report request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// The user asking for the report.
    pub requester: Requester,
    /// The users to cover.
    pub scope: ReportScope,
    /// The month to cover.
    pub range: MonthRange,
    /// The report flavor.
    pub variant: ReportVariant,
    /// The instant absence is judged against.
    pub now: DateTime<Utc>,
}

fn upstream(source_name: &str, error: SourceError) -> EngineError {
    warn!(source = source_name, error = %error, "Batched fetch failed");
    EngineError::UpstreamFetch {
        source_name: source_name.to_string(),
        message: error.to_string(),
    }
}

/// Generates a report for the requested scope.
///
/// # Errors
///
/// - [`EngineError::InvalidScope`] if the scope lacks its parameters.
/// - [`EngineError::ScopeNotPermitted`] if the directory refuses the scope.
/// - [`EngineError::NoUsersResolved`] if the scope covers nobody.
/// - [`EngineError::UpstreamFetch`] if the directory or any fetch fails.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{MonthRange, Report, ReportScope, ReportVariant, Requester, UserRef};
/// use attendance_engine::reconciliation::{LocalCalendar, ReportRequest, generate_report};
/// use attendance_engine::source::{InMemoryStore, SeedData};
/// use chrono::{TimeZone, Utc};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryStore::new(SeedData {
///     users: vec![UserRef { id: "u1".to_string(), name: "Aiko".to_string(), company_id: None }],
///     ..SeedData::default()
/// });
/// let request = ReportRequest {
///     requester: Requester { user_id: "u1".to_string(), company_id: None },
///     scope: ReportScope::Users { user_ids: vec!["u1".to_string()] },
///     range: MonthRange::new(2026, 1).unwrap(),
///     variant: ReportVariant::Full,
///     now: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
/// };
///
/// let report = generate_report(&store, &store, &LocalCalendar::utc(), &request).await.unwrap();
/// assert!(matches!(report, Report::Single(_)));
/// assert_eq!(store.fetch_counts().total(), 3);
/// # });
/// ```
pub async fn generate_report<D, S>(
    directory: &D,
    source: &S,
    calendar: &LocalCalendar,
    request: &ReportRequest,
) -> EngineResult<Report>
where
    D: UserDirectory + ?Sized,
    S: RecordSource + ?Sized,
{
    request.scope.validate()?;

    let users = directory
        .resolve(&request.requester, &request.scope)
        .await
        .map_err(|error| match error {
            SourceError::Forbidden(message) => EngineError::ScopeNotPermitted { message },
            other => upstream("users", other),
        })?;

    if users.is_empty() {
        return Err(EngineError::NoUsersResolved {
            scope: request.scope.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let users: Vec<UserRef> = users
        .into_iter()
        .filter(|user| seen.insert(user.id.clone()))
        .collect();
    let user_ids: Vec<String> = users.iter().map(|user| user.id.clone()).collect();
    let range = &request.range;

    let (shifts, events, expenses) = tokio::try_join!(
        async {
            source
                .fetch_shifts(&user_ids, range)
                .await
                .map_err(|error| upstream("shifts", error))
        },
        async {
            source
                .fetch_attendance_events(&user_ids, range)
                .await
                .map_err(|error| upstream("attendance events", error))
        },
        async {
            source
                .fetch_approved_expenses(&user_ids, range)
                .await
                .map_err(|error| upstream("expenses", error))
        },
    )?;

    let fetched_events = events.len();
    let index = RecordIndex::build(calendar, shifts, events, expenses);
    debug!(
        users = users.len(),
        shifts = index.shift_count(),
        attendance_events = fetched_events,
        event_days = index.event_day_count(),
        expense_days = index.expense_day_count(),
        year = range.year,
        month = range.month,
        "Indexed records for report"
    );

    let ctx = DayContext {
        calendar,
        variant: request.variant,
        now: request.now,
    };

    let reports = users
        .iter()
        .map(|user| aggregate_month(&ctx, user, range, &index))
        .collect();

    Ok(Report::from_user_reports(reports))
}
