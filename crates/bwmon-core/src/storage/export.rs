//! Append-only CSV log of measurement records.
//!
//! One headerless row per run in the canonical field order
//! (`ping, download, upload, server, timestamp`). Consumers parse rows
//! positionally, so the column order follows [`MeasurementRecord`]'s field
//! declaration order and must not change.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::ExportError;
use crate::record::MeasurementRecord;

/// Append one row for `record` to the CSV file at `path`, creating it if needed.
pub fn export_row(path: &Path, record: &MeasurementRecord) -> Result<(), ExportError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}
