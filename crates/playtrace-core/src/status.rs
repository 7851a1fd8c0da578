use serde::{Deserialize, Serialize};

/// Status of a test case.
///
/// Cases start as `Pending`. `Passed` and `Failed` are reached by recording a
/// test run; `Blocked` only through a direct update. No state is terminal.
///
/// Updates are not validated, so any other string is kept as `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    /// Not yet executed
    #[default]
    Pending,
    /// Most recent run passed
    Passed,
    /// Most recent run failed
    Failed,
    /// Cannot be executed right now
    Blocked,
    Other(String),
}

impl CaseStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::Passed => "passed",
            CaseStatus::Failed => "failed",
            CaseStatus::Blocked => "blocked",
            CaseStatus::Other(s) => s,
        }
    }
}

impl From<String> for CaseStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => CaseStatus::Pending,
            "passed" => CaseStatus::Passed,
            "failed" => CaseStatus::Failed,
            "blocked" => CaseStatus::Blocked,
            _ => CaseStatus::Other(s),
        }
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Outcome of a single test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Passed,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Passed => "passed",
            RunStatus::Failed => "failed",
        }
    }
}

impl From<RunStatus> for CaseStatus {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Passed => CaseStatus::Passed,
            RunStatus::Failed => CaseStatus::Failed,
        }
    }
}

/// Priority of a test case.
///
/// Unrecognized values are kept as `Other`, ordered after `Critical`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
            Priority::Other(s) => s,
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            "critical" => Priority::Critical,
            _ => Priority::Other(s),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
