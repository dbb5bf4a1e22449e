//! Bounded measurement history persisted as a JSON array.
//!
//! The history is loaded once at the start of a run, gains exactly one record,
//! and is written back in full at the end. Writes go to a temporary file in the
//! same directory which is then renamed over the previous history, so a crash
//! mid-write leaves the old file intact.

use std::fs::{self, Permissions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use super::HISTORY_MAX_LENGTH;
use crate::error::HistoryError;
use crate::record::MeasurementRecord;

/// On-disk location of the measurement history
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Create a store backed by the JSON file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing history file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history, oldest record first.
    ///
    /// A missing file is a cold start and yields an empty history. A file that
    /// exists but does not parse is an error: discarding it would lose data.
    pub fn load(&self) -> Result<Vec<MeasurementRecord>, HistoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "History file {} does not exist, creating a new one",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(HistoryError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let history: Vec<MeasurementRecord> =
            serde_json::from_slice(&bytes).map_err(|source| HistoryError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        info!("History file loaded with {} entries", history.len());
        Ok(history)
    }

    /// Replace the on-disk history with `history`.
    ///
    /// The replacement keeps the permissions of the file it replaces.
    pub fn persist(&self, history: &[MeasurementRecord]) -> Result<(), HistoryError> {
        let write_err = |source| HistoryError::Write {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(self.parent_dir()).map_err(write_err)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, history).map_err(HistoryError::Encode)?;
            writer.flush().map_err(write_err)?;
        }
        if let Some(permissions) = self.target_permissions() {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(
            "Persisted {} history entries to {}",
            history.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Permissions the history file should end up with.
    ///
    /// Those of the current file, or `0644` on a cold start (the temporary file
    /// itself is created `0600`).
    fn target_permissions(&self) -> Option<Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        }
    }

    /// Directory the temporary file is created in (must share the target's filesystem)
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Append `record` and keep only the most recent [`HISTORY_MAX_LENGTH`] entries.
pub fn append(
    mut history: Vec<MeasurementRecord>,
    record: MeasurementRecord,
) -> Vec<MeasurementRecord> {
    history.push(record);
    if history.len() > HISTORY_MAX_LENGTH {
        let excess = history.len() - HISTORY_MAX_LENGTH;
        history.drain(..excess);
    }
    history
}

/// Download values (bits per second) in chronological order
pub fn download_series(history: &[MeasurementRecord]) -> Vec<f64> {
    history.iter().map(|r| r.download).collect()
}

/// Upload values (bits per second) in chronological order
pub fn upload_series(history: &[MeasurementRecord]) -> Vec<f64> {
    history.iter().map(|r| r.upload).collect()
}
