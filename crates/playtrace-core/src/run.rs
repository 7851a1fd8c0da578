use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::RunStatus;

/// One recorded execution attempt of a test case.
///
/// Runs are append-only: once recorded they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRun {
    pub id: String,
    /// Case this run executed; not re-validated after creation
    pub test_case_id: String,
    pub executed_by: String,
    pub status: RunStatus,
    pub actual_result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Elapsed time, in whatever unit the caller chose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub executed_at: DateTime<Utc>,
}

impl TestRun {
    /// Creates a run stamped with the current time.
    pub fn new(
        test_case_id: impl Into<String>,
        executed_by: impl Into<String>,
        status: RunStatus,
        actual_result: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            test_case_id: test_case_id.into(),
            executed_by: executed_by.into(),
            status,
            actual_result: actual_result.into(),
            notes: None,
            duration: None,
            executed_at: Utc::now(),
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_duration(mut self, duration: Option<f64>) -> Self {
        self.duration = duration;
        self
    }
}

/// Request body for recording a test run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestRun {
    pub test_case_id: Option<String>,
    pub executed_by: Option<String>,
    pub status: Option<RunStatus>,
    pub actual_result: Option<String>,
    pub notes: Option<String>,
    pub duration: Option<f64>,
}
