use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, ordered grouping of test case ids.
///
/// Membership is by id only; the ids are not checked against the case
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: String,
    pub name: String,
    pub description: String,
    pub test_cases: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TestSuite {
    /// Creates an empty suite with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            test_cases: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_test_cases(mut self, test_cases: Vec<String>) -> Self {
        self.test_cases = test_cases;
        self
    }
}

/// Request body for creating a test suite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestSuite {
    pub name: Option<String>,
    pub description: Option<String>,
    pub test_cases: Option<Vec<String>>,
}
