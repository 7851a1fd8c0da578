//! API request/response models that are not domain entities.
//!
//! Entities and create/update bodies live in `playtrace_core`; this module only
//! holds the shapes specific to the HTTP layer.

use serde::{Deserialize, Serialize};

/// Response for `/api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Query parameters for `GET /api/tests/runs`.
#[derive(Debug, Default, Deserialize)]
pub struct RunsQuery {
    /// Only return runs of this test case.
    #[serde(rename = "testCaseId")]
    pub test_case_id: Option<String>,
}
