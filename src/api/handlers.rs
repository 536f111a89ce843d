//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Report;
use crate::reconciliation::{ReportTable, generate_report};

use super::request::ReportRequestBody;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reports", post(report_handler))
        .route("/reports/table", post(table_handler))
        .with_state(state)
}

/// Handler for POST /reports.
///
/// Responds with the report, single or multi shaped.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequestBody>, JsonRejection>,
) -> Response {
    match run_report(&state, payload).await {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(response) => response,
    }
}

/// Handler for POST /reports/table.
///
/// Responds with one table per user, in user-id order for multi reports.
async fn table_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequestBody>, JsonRejection>,
) -> Response {
    match run_report(&state, payload).await {
        Ok(report) => {
            let tables: Vec<ReportTable> = report
                .user_reports()
                .map(ReportTable::from_user_report)
                .collect();
            json_response(StatusCode::OK, &tables)
        }
        Err(response) => response,
    }
}

/// Parses the request body and generates the report, or builds the error
/// response to return.
async fn run_report(
    state: &AppState,
    payload: Result<Json<ReportRequestBody>, JsonRejection>,
) -> Result<Report, Response> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return Err(json_response(StatusCode::BAD_REQUEST, &error));
        }
    };

    let request = body
        .into_request(Utc::now())
        .map_err(|err| engine_error_response(correlation_id, err.into()))?;

    let start_time = Instant::now();
    match generate_report(
        state.directory(),
        state.source(),
        state.calendar(),
        &request,
    )
    .await
    {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                organization = %state.config().organization().name,
                requester = %request.requester.user_id,
                scope = %request.scope,
                variant = ?request.variant,
                users = report.user_reports().count(),
                duration_us = start_time.elapsed().as_micros(),
                "Report generated successfully"
            );
            Ok(report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                scope = %request.scope,
                error = %err,
                "Report generation failed"
            );
            Err(engine_error_response(correlation_id, err.into()))
        }
    }
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message carries the offending field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    info!(
        correlation_id = %correlation_id,
        status = api_error.status.as_u16(),
        code = %api_error.error.code,
        "Rejecting report request"
    );
    json_response(api_error.status, &api_error.error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::source::{InMemoryStore, SeedData};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state(store: Arc<InMemoryStore>) -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config, store.clone(), store)
    }

    fn seeded_store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::load_seed("./config/default/seed.json").expect("seed"))
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    const SINGLE_USER_BODY: &str = r#"{
        "requester": { "user_id": "u002", "company_id": "sakura" },
        "scope": { "type": "users", "user_ids": ["u001"] },
        "year": 2026,
        "month": 1,
        "variant": "full",
        "now": "2026-02-01T00:00:00Z"
    }"#;

    #[tokio::test]
    async fn test_report_returns_200_with_single_shape() {
        let router = create_router(create_test_state(seeded_store()));

        let response = router
            .oneshot(post("/reports", SINGLE_USER_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: Report = serde_json::from_slice(&body).unwrap();
        let Report::Single(report) = report else {
            panic!("expected a single-user report");
        };
        assert_eq!(report.user.id, "u001");
        assert_eq!(report.days.len(), 31);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state(seeded_store()));

        let response = router
            .oneshot(post("/reports", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_table_endpoint_returns_one_table() {
        let router = create_router(create_test_state(seeded_store()));

        let response = router
            .oneshot(post("/reports/table", SINGLE_USER_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let tables: Vec<ReportTable> = serde_json::from_slice(&body).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].columns.len(), 14);
    }

    #[tokio::test]
    async fn test_empty_store_yields_404() {
        let store = Arc::new(InMemoryStore::new(SeedData::default()));
        let router = create_router(create_test_state(store));

        let response = router
            .oneshot(post("/reports", SINGLE_USER_BODY))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
