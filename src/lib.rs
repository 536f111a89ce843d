//! Attendance reconciliation and reporting engine.
//!
//! This crate reconciles planned shifts, clock events and approved expenses
//! into a per-day, per-user monthly attendance record in the organization's
//! local calendar, and aggregates monthly summaries for one user, a company
//! or the whole organization.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
pub mod source;
