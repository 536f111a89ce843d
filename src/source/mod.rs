//! Ports to the engine's external collaborators.
//!
//! The engine never queries storage or evaluates permissions itself. It asks
//! a [`UserDirectory`] for the already-authorized users of a scope and a
//! [`RecordSource`] for the records of those users over a month, one batched
//! call per record stream.

mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AttendanceEvent, ExpenseEntry, MonthRange, ReportScope, Requester, Shift, UserRef,
};

pub use in_memory::{FetchCounts, InMemoryStore, SeedData};

/// Errors reported by collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backing store could not answer.
    #[error("{0}")]
    Unavailable(String),
    /// The permission layer refused the request.
    #[error("{0}")]
    Forbidden(String),
}

/// Batched reads of source records.
///
/// Each method must answer for every given user in a single query.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches the shifts of the given users within the month.
    async fn fetch_shifts(
        &self,
        user_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<Shift>, SourceError>;

    /// Fetches the clock events of the given users that may fall on a local
    /// day of the month, in creation order. Events from the adjacent days are
    /// allowed; they are never looked up.
    async fn fetch_attendance_events(
        &self,
        user_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<AttendanceEvent>, SourceError>;

    /// Fetches the approved expenses of the given users within the month.
    async fn fetch_approved_expenses(
        &self,
        user_ids: &[String],
        range: &MonthRange,
    ) -> Result<Vec<ExpenseEntry>, SourceError>;
}

/// Resolves a scope into the users the requester may report on.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the users covered by `scope`, or [`SourceError::Forbidden`]
    /// if the requester may not use it.
    async fn resolve(
        &self,
        requester: &Requester,
        scope: &ReportScope,
    ) -> Result<Vec<UserRef>, SourceError>;
}
