//! Run configuration passed explicitly into the monitor

use std::path::PathBuf;

use crate::measurement::RetryPolicy;

/// Everything one monitor run needs besides its collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// JSON history file, read at start and replaced at the end of the run
    pub history_path: PathBuf,
    /// Optional CSV log that receives one row per run
    pub csv_path: Option<PathBuf>,
    /// Retry policy around the measurement call
    pub retry: RetryPolicy,
}

impl MonitorConfig {
    /// Configuration with the given history file, no CSV export and the default retry policy
    pub fn new(history_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            csv_path: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Also append each record to the CSV file at `path`
    pub fn with_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    /// Use a custom retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
