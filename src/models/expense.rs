//! Reimbursable expense model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Review state of an expense entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    /// Submitted, not yet reviewed.
    Pending,
    /// Approved for reimbursement.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

/// One reimbursable amount for a user on a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The user who incurred the expense.
    pub user_id: String,
    /// The organization-local calendar day the expense belongs to.
    pub date: NaiveDate,
    /// The amount claimed.
    pub amount: Decimal,
    /// Review state; only approved entries count toward totals.
    pub status: ExpenseStatus,
}

impl ExpenseEntry {
    /// Returns true if the entry contributes to expense totals.
    pub fn is_approved(&self) -> bool {
        self.status == ExpenseStatus::Approved
    }
}
