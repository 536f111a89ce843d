//! Request types for the Attendance Engine API.
//!
//! This module defines the JSON request body shared by the `/reports` and
//! `/reports/table` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{MonthRange, ReportScope, ReportVariant, Requester};
use crate::reconciliation::ReportRequest;

/// Request body for the report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequestBody {
    /// The already-authenticated user asking for the report.
    pub requester: Requester,
    /// The users to cover.
    pub scope: ReportScope,
    /// Calendar year.
    pub year: i32,
    /// Month, 1..=12.
    pub month: u32,
    /// The report flavor.
    pub variant: ReportVariant,
    /// The instant absence is judged against. Defaults to the server clock.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

impl ReportRequestBody {
    /// Converts the body into an engine request, judging against `clock`
    /// when the body carries no `now`.
    ///
    /// Fails with `InvalidMonth` if year/month do not name a calendar month.
    pub fn into_request(self, clock: DateTime<Utc>) -> EngineResult<ReportRequest> {
        Ok(ReportRequest {
            range: MonthRange::new(self.year, self.month)?,
            requester: self.requester,
            scope: self.scope,
            variant: self.variant,
            now: self.now.unwrap_or(clock),
        })
    }
}
