pub mod case;
pub mod config;
pub mod manager;
pub mod run;
pub mod stats;
pub mod status;
pub mod storage;
pub mod suite;

pub use case::{NewTestCase, TestCase, TestCaseUpdate};
pub use config::{Config, ConfigError, LogConfig, ServerConfig};
pub use manager::{ManagerError, TestManager};
pub use run::{NewTestRun, TestRun};
pub use stats::CaseStats;
pub use status::{CaseStatus, Priority, RunStatus};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use suite::{NewTestSuite, TestSuite};
