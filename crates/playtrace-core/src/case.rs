use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{CaseStatus, Priority};

/// A specification of a single thing to verify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Unique identifier, assigned at creation
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered instructions to follow
    pub steps: Vec<String>,
    pub expected_result: String,
    /// Latest known outcome; overwritten by each recorded run
    pub status: CaseStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl TestCase {
    /// Creates a new pending test case with no steps and medium priority.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        expected_result: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            steps: Vec::new(),
            expected_result: expected_result.into(),
            status: CaseStatus::Pending,
            priority: Priority::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Merges every field present in `update` over this case.
    ///
    /// Omitted fields are left unchanged. `updated_at` is refreshed even when
    /// the update carries no fields.
    pub fn apply_update(&mut self, update: TestCaseUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(steps) = update.steps {
            self.steps = steps;
        }
        if let Some(expected_result) = update.expected_result {
            self.expected_result = expected_result;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        self.touch();
    }

    /// Overwrites the status, as recording a test run does.
    pub fn set_status(&mut self, status: CaseStatus) {
        self.status = status;
        self.touch();
    }

    /// Refreshes `updated_at`, guaranteeing it strictly increases.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Request body for creating a test case.
///
/// Required fields are optional here so that absence can be reported as a
/// validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestCase {
    pub title: Option<String>,
    pub description: Option<String>,
    pub steps: Option<Vec<String>>,
    pub expected_result: Option<String>,
    pub priority: Option<Priority>,
}

/// Partial update of a test case.
///
/// Absent and `null` fields both leave the stored value unchanged.
///
/// `id` and the timestamps are not part of this shape, so any such keys in a
/// request body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub steps: Option<Vec<String>>,
    pub expected_result: Option<String>,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
}
