use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Test case not found: {0}")]
    CaseNotFound(String),

    #[error("Test suite not found: {0}")]
    SuiteNotFound(String),
}

impl StorageError {
    /// Returns true if the error means the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::CaseNotFound(_) | StorageError::SuiteNotFound(_)
        )
    }
}
