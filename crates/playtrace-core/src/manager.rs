use thiserror::Error;
use tracing::debug;

use crate::case::{NewTestCase, TestCase, TestCaseUpdate};
use crate::run::{NewTestRun, TestRun};
use crate::stats::CaseStats;
use crate::status::Priority;
use crate::storage::{Storage, StorageError};
use crate::suite::{NewTestSuite, TestSuite};

const MISSING_FIELDS: &str = "Missing required fields";
const MISSING_NAME: &str = "Name is required";

/// Manages test cases, test runs and test suites.
///
/// Owns the storage backend and is the only path through which the
/// collections are read or mutated. Create operations check that required
/// fields are present; updates are merged without further validation.
pub struct TestManager<S: Storage> {
    storage: S,
}

impl<S: Storage> TestManager<S> {
    /// Creates a new TestManager with the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    // =========================================================================
    // Test cases
    // =========================================================================

    /// Lists all test cases in insertion order.
    pub fn list_cases(&self) -> Result<Vec<TestCase>, ManagerError> {
        Ok(self.storage.list_cases()?)
    }

    /// Gets a test case by ID.
    pub fn get_case(&self, id: &str) -> Result<TestCase, ManagerError> {
        Ok(self.storage.load_case(id)?)
    }

    /// Creates a pending test case.
    ///
    /// `title`, `description` and `expectedResult` must be present and
    /// non-empty. Steps default to none and an absent or empty priority to
    /// medium. Any other priority string is stored as given.
    pub fn create_case(&mut self, input: NewTestCase) -> Result<TestCase, ManagerError> {
        let (Some(title), Some(description), Some(expected_result)) = (
            present(input.title),
            present(input.description),
            present(input.expected_result),
        ) else {
            return Err(ManagerError::Validation(MISSING_FIELDS.to_string()));
        };

        let case = TestCase::new(title, description, expected_result)
            .with_steps(input.steps.unwrap_or_default())
            .with_priority(match input.priority {
                Some(Priority::Other(p)) if p.is_empty() => Priority::default(),
                Some(p) => p,
                None => Priority::default(),
            });

        self.storage.save_case(case.clone())?;
        debug!(id = %case.id, title = %case.title, "created test case");
        Ok(case)
    }

    /// Merges the given fields over an existing test case.
    pub fn update_case(
        &mut self,
        id: &str,
        update: TestCaseUpdate,
    ) -> Result<TestCase, ManagerError> {
        let mut case = self.storage.load_case(id)?;
        case.apply_update(update);
        self.storage.save_case(case.clone())?;
        debug!(id = %case.id, status = case.status.as_str(), "updated test case");
        Ok(case)
    }

    /// Deletes a test case. Runs and suites that reference it are kept.
    pub fn delete_case(&mut self, id: &str) -> Result<(), ManagerError> {
        self.storage.delete_case(id)?;
        debug!(id, "deleted test case");
        Ok(())
    }

    // =========================================================================
    // Test runs
    // =========================================================================

    /// Records a test run and copies its status onto the referenced case.
    ///
    /// Fails with not-found, without recording anything, if the case does
    /// not exist.
    pub fn create_run(&mut self, input: NewTestRun) -> Result<TestRun, ManagerError> {
        let (Some(test_case_id), Some(executed_by), Some(status), Some(actual_result)) = (
            present(input.test_case_id),
            present(input.executed_by),
            input.status,
            present(input.actual_result),
        ) else {
            return Err(ManagerError::Validation(MISSING_FIELDS.to_string()));
        };

        self.storage.load_case(&test_case_id)?;

        let run = TestRun::new(test_case_id, executed_by, status, actual_result)
            .with_notes(input.notes)
            .with_duration(input.duration);
        self.storage.save_run(run.clone())?;
        debug!(id = %run.id, case_id = %run.test_case_id, status = run.status.as_str(), "recorded test run");

        let mut case = self.storage.load_case(&run.test_case_id)?;
        case.set_status(run.status.into());
        self.storage.save_case(case)?;
        debug!(case_id = %run.test_case_id, "case status follows latest run");

        Ok(run)
    }

    /// Lists test runs, optionally only those for one test case.
    ///
    /// An empty filter is treated the same as no filter.
    pub fn list_runs(&self, test_case_id: Option<&str>) -> Result<Vec<TestRun>, ManagerError> {
        let runs = self.storage.list_runs()?;

        Ok(match test_case_id.filter(|id| !id.is_empty()) {
            Some(id) => runs.into_iter().filter(|r| r.test_case_id == id).collect(),
            None => runs,
        })
    }

    // =========================================================================
    // Test suites
    // =========================================================================

    /// Lists all test suites in insertion order.
    pub fn list_suites(&self) -> Result<Vec<TestSuite>, ManagerError> {
        Ok(self.storage.list_suites()?)
    }

    /// Gets a test suite by ID.
    pub fn get_suite(&self, id: &str) -> Result<TestSuite, ManagerError> {
        Ok(self.storage.load_suite(id)?)
    }

    /// Creates a test suite. Member ids are stored as given.
    pub fn create_suite(&mut self, input: NewTestSuite) -> Result<TestSuite, ManagerError> {
        let Some(name) = present(input.name) else {
            return Err(ManagerError::Validation(MISSING_NAME.to_string()));
        };

        let suite = TestSuite::new(name)
            .with_description(input.description.unwrap_or_default())
            .with_test_cases(input.test_cases.unwrap_or_default());

        self.storage.save_suite(suite.clone())?;
        debug!(id = %suite.id, name = %suite.name, "created test suite");
        Ok(suite)
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Summarizes case statuses across the whole collection.
    pub fn stats(&self) -> Result<CaseStats, ManagerError> {
        let cases = self.storage.list_cases()?;
        Ok(CaseStats::from_cases(&cases))
    }
}

/// Treats empty strings as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Errors that can occur in TestManager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ManagerError {
    /// Returns true if a referenced entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManagerError::Storage(e) if e.is_not_found())
    }
}
