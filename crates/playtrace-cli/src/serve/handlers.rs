//! HTTP route handlers for the API server.
//!
//! Handlers are kept thin: they extract the request, take the state lock and
//! delegate to `TestManager`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use playtrace_core::config::HEALTH_MESSAGE;
use playtrace_core::{
    CaseStats, NewTestCase, NewTestRun, NewTestSuite, TestCase, TestCaseUpdate, TestRun,
    TestSuite,
};

use super::error::ApiError;
use super::models::{HealthResponse, RunsQuery};
use super::AppState;

type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Service Handlers
// =============================================================================

/// GET `/api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: HEALTH_MESSAGE,
    })
}

/// Fallback for unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

// =============================================================================
// Test Case Handlers
// =============================================================================

/// GET `/api/tests/cases`
pub async fn list_cases(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TestCase>>> {
    let manager = state.manager.read().await;
    Ok(Json(manager.list_cases()?))
}

/// GET `/api/tests/cases/{id}`
pub async fn get_case(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TestCase>> {
    let manager = state.manager.read().await;
    Ok(Json(manager.get_case(&id)?))
}

/// POST `/api/tests/cases`
pub async fn create_case(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTestCase>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TestCase>)> {
    let Json(input) = payload?;
    let mut manager = state.manager.write().await;
    let case = manager.create_case(input)?;
    Ok((StatusCode::CREATED, Json(case)))
}

/// PUT `/api/tests/cases/{id}`
///
/// Any subset of fields may be sent; omitted fields are kept.
pub async fn update_case(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<TestCaseUpdate>, JsonRejection>,
) -> ApiResult<Json<TestCase>> {
    let Json(update) = payload?;
    let mut manager = state.manager.write().await;
    Ok(Json(manager.update_case(&id, update)?))
}

/// DELETE `/api/tests/cases/{id}`
pub async fn delete_case(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut manager = state.manager.write().await;
    manager.delete_case(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Test Run Handlers
// =============================================================================

/// POST `/api/tests/runs`
///
/// Also sets the referenced case's status to the run's status.
pub async fn create_run(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTestRun>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TestRun>)> {
    let Json(input) = payload?;
    let mut manager = state.manager.write().await;
    let run = manager.create_run(input)?;
    Ok((StatusCode::CREATED, Json(run)))
}

/// GET `/api/tests/runs`
///
/// Query parameters:
/// - `testCaseId`: only runs of this case (optional)
pub async fn list_runs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RunsQuery>,
) -> ApiResult<Json<Vec<TestRun>>> {
    let manager = state.manager.read().await;
    Ok(Json(manager.list_runs(params.test_case_id.as_deref())?))
}

// =============================================================================
// Test Suite Handlers
// =============================================================================

/// GET `/api/tests/suites`
pub async fn list_suites(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TestSuite>>> {
    let manager = state.manager.read().await;
    Ok(Json(manager.list_suites()?))
}

/// GET `/api/tests/suites/{id}`
pub async fn get_suite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TestSuite>> {
    let manager = state.manager.read().await;
    Ok(Json(manager.get_suite(&id)?))
}

/// POST `/api/tests/suites`
pub async fn create_suite(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTestSuite>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TestSuite>)> {
    let Json(input) = payload?;
    let mut manager = state.manager.write().await;
    let suite = manager.create_suite(input)?;
    Ok((StatusCode::CREATED, Json(suite)))
}

// =============================================================================
// Dashboard Handlers
// =============================================================================

/// GET `/api/tests/stats` - Case counts by status and the pass rate.
pub async fn stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<CaseStats>> {
    let manager = state.manager.read().await;
    Ok(Json(manager.stats()?))
}
