use indexmap::IndexMap;

use crate::case::TestCase;
use crate::run::TestRun;
use crate::suite::TestSuite;

use super::error::StorageError;
use super::Storage;

/// In-memory storage implementation.
///
/// Holds three independent collections keyed by id. `IndexMap` gives id
/// lookup while keeping insertion order for listings. Nothing survives the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cases: IndexMap<String, TestCase>,
    runs: IndexMap<String, TestRun>,
    suites: IndexMap<String, TestSuite>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn list_cases(&self) -> Result<Vec<TestCase>, StorageError> {
        Ok(self.cases.values().cloned().collect())
    }

    fn load_case(&self, id: &str) -> Result<TestCase, StorageError> {
        self.cases
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::CaseNotFound(id.to_string()))
    }

    fn save_case(&mut self, case: TestCase) -> Result<(), StorageError> {
        // Re-inserting an existing key keeps its position.
        self.cases.insert(case.id.clone(), case);
        Ok(())
    }

    fn delete_case(&mut self, id: &str) -> Result<(), StorageError> {
        self.cases
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| StorageError::CaseNotFound(id.to_string()))
    }

    fn save_run(&mut self, run: TestRun) -> Result<(), StorageError> {
        self.runs.insert(run.id.clone(), run);
        Ok(())
    }

    fn list_runs(&self) -> Result<Vec<TestRun>, StorageError> {
        Ok(self.runs.values().cloned().collect())
    }

    fn list_suites(&self) -> Result<Vec<TestSuite>, StorageError> {
        Ok(self.suites.values().cloned().collect())
    }

    fn load_suite(&self, id: &str) -> Result<TestSuite, StorageError> {
        self.suites
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::SuiteNotFound(id.to_string()))
    }

    fn save_suite(&mut self, suite: TestSuite) -> Result<(), StorageError> {
        self.suites.insert(suite.id.clone(), suite);
        Ok(())
    }
}
