//! HTTP API module for the Attendance Engine.
//!
//! This module exposes monthly attendance reports as JSON, either as the
//! structured report or as variant-driven tables ready for rendering.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReportRequestBody;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
