//! Single-shot monitor run
//!
//! One run loads the history, takes one measurement, records it, and
//! optionally refreshes the display. There is no state between runs other than
//! the history file itself.

use log::{debug, error, info};

use crate::config::MonitorConfig;
use crate::display::{Border, DisplaySink};
use crate::error::MonitorError;
use crate::measurement::MeasurementSource;
use crate::pages::ReportPage;
use crate::record::MeasurementRecord;
use crate::storage::{HistoryStore, append, export_row};

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// The record taken this run
    pub record: MeasurementRecord,
    /// History length after appending
    pub history_len: usize,
    /// Whether the CSV row was written (false if not configured or failed)
    pub exported: bool,
}

/// Perform one complete monitor run.
///
/// Fatal: malformed history, measurement exhausted, history write failure,
/// display failure. A failed CSV export is logged and the run continues.
/// When `display` is `None` (headless) rendering is skipped entirely.
pub fn run_once<S>(
    config: &MonitorConfig,
    source: &mut S,
    display: Option<&mut dyn DisplaySink>,
) -> Result<RunOutcome, MonitorError>
where
    S: MeasurementSource + ?Sized,
{
    let store = HistoryStore::new(&config.history_path);
    let history = store.load()?;

    info!("{} SpeedTest ...", source.label());
    let record = config.retry.run(|_| source.measure())?;
    info!("SpeedTest data: {:?}", record);

    let history = append(history, record.clone());
    store.persist(&history)?;

    let exported = match &config.csv_path {
        Some(path) => match export_row(path, &record) {
            Ok(()) => true,
            Err(e) => {
                error!("Error writing to CSV @ {}: {}", path.display(), e);
                false
            }
        },
        None => false,
    };

    if let Some(display) = display {
        let frame = ReportPage::new(&record, &history).render();
        debug!("Handing frame to display ({} border)", Border::Black.label());
        display.show(&frame, Border::Black)?;
    }

    info!("Process complete!");
    Ok(RunOutcome {
        record,
        history_len: history.len(),
        exported,
    })
}
