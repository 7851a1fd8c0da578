use serde::{Deserialize, Serialize};

use crate::case::TestCase;
use crate::status::CaseStatus;

/// Status breakdown across all test cases, as shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
    pub blocked: usize,
    /// Percentage of cases passed, rounded to one decimal place
    pub pass_rate: f64,
}

impl CaseStats {
    /// Tallies the given cases by status.
    pub fn from_cases<'a>(cases: impl IntoIterator<Item = &'a TestCase>) -> Self {
        let mut stats = Self::default();

        for case in cases {
            stats.total += 1;
            match case.status {
                CaseStatus::Passed => stats.passed += 1,
                CaseStatus::Failed => stats.failed += 1,
                CaseStatus::Pending => stats.pending += 1,
                CaseStatus::Blocked => stats.blocked += 1,
                // Free-form statuses only count toward the total.
                CaseStatus::Other(_) => {}
            }
        }

        if stats.total > 0 {
            let rate = stats.passed as f64 / stats.total as f64 * 100.0;
            stats.pass_rate = (rate * 10.0).round() / 10.0;
        }

        stats
    }
}
