pub mod export;
pub mod history;

pub use export::export_row;
pub use history::{HistoryStore, append, download_series, upload_series};

/// Maximum number of records kept in the history file (oldest evicted first)
pub const HISTORY_MAX_LENGTH: usize = 120;
