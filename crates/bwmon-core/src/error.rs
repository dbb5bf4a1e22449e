//! Error types for bwmon operations

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors from loading or persisting the history file
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history file exists but could not be read
    #[error("Failed to read history file {path}")]
    Read {
        /// History file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The history file exists but is not a valid JSON array of records
    #[error("Malformed history file {path}")]
    Malformed {
        /// History file path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The history could not be serialized
    #[error("Failed to encode history")]
    Encode(#[source] serde_json::Error),

    /// Writing or replacing the history file failed
    #[error("Failed to write history file {path}")]
    Write {
        /// History file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors from appending a row to the CSV log
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV file could not be opened for appending
    #[error("Failed to open CSV file {path}")]
    Open {
        /// CSV file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Encoding or flushing the row failed
    #[error("Failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors from the measurement collaborator
#[derive(Debug, Error)]
pub enum MeasurementError {
    /// The measurement program could not be started
    #[error("Failed to start {program}")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The measurement program exited unsuccessfully
    #[error("Measurement command failed ({status}): {stderr}")]
    CommandFailed {
        /// Exit status of the program
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The measurement output could not be parsed
    #[error("Unparsable measurement output: {0}")]
    Parse(#[from] serde_json::Error),

    /// The measurement timestamp could not be parsed
    #[error("Unparsable measurement timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Every attempt allowed by the retry policy failed
    #[error("Measurement failed after {attempts} attempts: {last}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        last: Box<MeasurementError>,
    },
}

/// Errors from handing a frame to the display
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Writing the frame failed
    #[error("Display I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The display could not be reached
    #[error("Display unavailable: {0}")]
    Unavailable(String),
}

/// Fatal errors that abort a monitor run
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Loading or persisting history failed
    #[error(transparent)]
    History(#[from] HistoryError),

    /// The measurement could not be taken
    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    /// The rendered report could not be shown
    #[error(transparent)]
    Display(#[from] DisplayError),
}
