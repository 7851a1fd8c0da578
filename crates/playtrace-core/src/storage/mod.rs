mod error;
mod memory;

pub use error::StorageError;
pub use memory::MemoryStorage;

use crate::case::TestCase;
use crate::run::TestRun;
use crate::suite::TestSuite;

/// Trait for collection storage backends.
///
/// Each collection is keyed by entity id and lists in insertion order.
/// Saving an entity whose id already exists replaces it in place.
pub trait Storage {
    /// Lists all test cases in insertion order.
    fn list_cases(&self) -> Result<Vec<TestCase>, StorageError>;

    /// Loads a test case by ID.
    fn load_case(&self, id: &str) -> Result<TestCase, StorageError>;

    /// Saves a test case, appending it or replacing the existing entry.
    fn save_case(&mut self, case: TestCase) -> Result<(), StorageError>;

    /// Deletes a test case. Runs and suites referencing it are untouched.
    fn delete_case(&mut self, id: &str) -> Result<(), StorageError>;

    /// Appends a test run.
    fn save_run(&mut self, run: TestRun) -> Result<(), StorageError>;

    /// Lists all test runs in insertion order.
    fn list_runs(&self) -> Result<Vec<TestRun>, StorageError>;

    /// Lists all test suites in insertion order.
    fn list_suites(&self) -> Result<Vec<TestSuite>, StorageError>;

    /// Loads a test suite by ID.
    fn load_suite(&self, id: &str) -> Result<TestSuite, StorageError>;

    /// Saves a test suite, appending it or replacing the existing entry.
    fn save_suite(&mut self, suite: TestSuite) -> Result<(), StorageError>;
}
