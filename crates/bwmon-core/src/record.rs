//! Measurement record data model.
//!
//! A [`MeasurementRecord`] is one bandwidth-test result. The same struct is
//! stored in the JSON history file and flattened into CSV rows, so its field
//! order is part of the on-disk contract:
//!
//! | # | field       | unit / format               |
//! |---|-------------|-----------------------------|
//! | 0 | `ping`      | milliseconds                |
//! | 1 | `download`  | bits per second             |
//! | 2 | `upload`    | bits per second             |
//! | 3 | `server`    | human-readable label        |
//! | 4 | `timestamp` | [`TIME_FORMAT`]             |

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// strftime format for record timestamps, e.g. `Jan 01 2024 @ 00:00:00`
pub const TIME_FORMAT: &str = "%b %d %Y @ %H:%M:%S";

/// Bits per second in one megabit per second (the display unit)
pub const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Decimal places kept when converting to the display unit
const DISPLAY_UNIT_DECIMALS: i32 = 2;

/// A single bandwidth-test result.
///
/// Field declaration order is the canonical row order; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Round-trip latency in milliseconds
    pub ping: f64,
    /// Download throughput in bits per second
    pub download: f64,
    /// Upload throughput in bits per second
    pub upload: f64,
    /// Name of the server the test ran against
    pub server: String,
    /// Local time of the test, formatted with [`TIME_FORMAT`]
    pub timestamp: String,
}

impl MeasurementRecord {
    /// Creates a record, formatting `at` with [`TIME_FORMAT`].
    pub fn new<Tz>(
        ping: f64,
        download: f64,
        upload: f64,
        server: impl Into<String>,
        at: &DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            ping,
            download,
            upload,
            server: server.into(),
            timestamp: format_timestamp(at),
        }
    }

    /// Download throughput in the display unit (Mbps, 2 decimals)
    pub fn download_mbps(&self) -> f64 {
        to_display_unit(self.download)
    }

    /// Upload throughput in the display unit (Mbps, 2 decimals)
    pub fn upload_mbps(&self) -> f64 {
        to_display_unit(self.upload)
    }
}

/// Format a timestamp the way records store it.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(TIME_FORMAT).to_string()
}

/// Convert bits per second to megabits per second rounded to 2 decimals.
///
/// Ties round to even. Charts go through this so labels and plotted points
/// agree.
pub fn to_display_unit(bits_per_second: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_UNIT_DECIMALS);
    (bits_per_second / BITS_PER_MEGABIT * scale).round_ties_even() / scale
}
