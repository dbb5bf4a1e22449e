//! Measurement collaborator interface and retry policy.
//!
//! A [`MeasurementSource`] produces one [`MeasurementRecord`] per call. Two
//! sources are provided:
//!
//! - [`SpeedtestCli`] runs the `speedtest-cli` program and parses its JSON
//!   report.
//! - [`FakeSpeedtest`] produces plausible random values without touching the
//!   network, for testing the rest of the pipeline.
//!
//! Transient failures are retried by [`RetryPolicy`], which is the only
//! retry policy in the program.

use std::process::Command;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use log::{debug, warn};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde::Deserialize;

use crate::error::MeasurementError;
use crate::record::MeasurementRecord;

/// Default number of measurement attempts before giving up
pub const MEASUREMENT_ATTEMPTS: u32 = 3;

/// Default `speedtest-cli` executable
pub const SPEEDTEST_PROGRAM: &str = "speedtest-cli";

// Fake measurement baselines and jitter ranges
const FAKE_DOWNLOAD_BPS: f64 = 65_615_904.351_459_4;
const FAKE_DOWNLOAD_JITTER_BPS: (i64, i64) = (-10_000_000, 10_000_000);
const FAKE_UPLOAD_BPS: f64 = 11_403_348.479_477_078;
const FAKE_UPLOAD_JITTER_BPS: (i64, i64) = (-1_000_000, 2_000_000);
const FAKE_PING_MS: f64 = 24.259;
const FAKE_PING_JITTER_MS: (i64, i64) = (-5, 5);
const FAKE_SERVER: &str = "Montreal, QC";

/// A way of taking one bandwidth measurement
pub trait MeasurementSource {
    /// Take one measurement, blocking until it completes.
    fn measure(&mut self) -> Result<MeasurementRecord, MeasurementError>;

    /// Verb used in logs ("Running", "Faking")
    fn label(&self) -> &'static str {
        "Running"
    }
}

/// Bounded-attempt retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one (0 is treated as 1)
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MEASUREMENT_ATTEMPTS)
    }
}

impl RetryPolicy {
    /// Retry up to `max_attempts` times with no pause in between
    pub const fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    /// Pause `delay` between attempts
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Call `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number. After the final failure the
    /// last error is returned wrapped in [`MeasurementError::Exhausted`].
    pub fn run<T, F>(&self, mut op: F) -> Result<T, MeasurementError>
    where
        F: FnMut(u32) -> Result<T, MeasurementError>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let e = match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };
            warn!("Attempt {}/{} failed: {}", attempt, attempts, e);

            if attempt >= attempts {
                return Err(MeasurementError::Exhausted {
                    attempts,
                    last: Box::new(e),
                });
            }
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            attempt += 1;
        }
    }
}

/// Measures with the `speedtest-cli` program (`--json` output)
#[derive(Debug, Clone)]
pub struct SpeedtestCli {
    program: String,
}

impl Default for SpeedtestCli {
    fn default() -> Self {
        Self::new(SPEEDTEST_PROGRAM)
    }
}

impl SpeedtestCli {
    /// Use `program` as the speedtest executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MeasurementSource for SpeedtestCli {
    fn measure(&mut self) -> Result<MeasurementRecord, MeasurementError> {
        debug!("Executing {} --json", self.program);
        let output = Command::new(&self.program)
            .arg("--json")
            .output()
            .map_err(|source| MeasurementError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(MeasurementError::CommandFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_speedtest_json(&output.stdout)
    }
}

/// Subset of the `speedtest-cli --json` report that a record needs
#[derive(Debug, Deserialize)]
struct SpeedtestReport {
    ping: f64,
    download: f64,
    upload: f64,
    server: SpeedtestServer,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct SpeedtestServer {
    name: String,
}

/// Parse a `speedtest-cli --json` report, converting its UTC timestamp to local time.
pub fn parse_speedtest_json(bytes: &[u8]) -> Result<MeasurementRecord, MeasurementError> {
    parse_speedtest_json_in(bytes, &Local)
}

fn parse_speedtest_json_in<Tz>(
    bytes: &[u8],
    tz: &Tz,
) -> Result<MeasurementRecord, MeasurementError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let report: SpeedtestReport = serde_json::from_slice(bytes)?;
    let at = DateTime::parse_from_rfc3339(&report.timestamp)?.with_timezone(tz);

    Ok(MeasurementRecord::new(
        report.ping,
        report.download,
        report.upload,
        report.server.name,
        &at,
    ))
}

/// Produces synthetic measurements around fixed baselines
pub struct FakeSpeedtest<R = ThreadRng> {
    rng: R,
}

impl Default for FakeSpeedtest {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSpeedtest {
    /// Fake source driven by the thread-local RNG
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> FakeSpeedtest<R> {
    /// Fake source driven by `rng` (seed it for reproducible values)
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn jitter(&mut self, (low, high): (i64, i64)) -> f64 {
        self.rng.random_range(low..high) as f64
    }
}

impl<R: Rng> MeasurementSource for FakeSpeedtest<R> {
    fn measure(&mut self) -> Result<MeasurementRecord, MeasurementError> {
        let download = FAKE_DOWNLOAD_BPS + self.jitter(FAKE_DOWNLOAD_JITTER_BPS);
        let upload = FAKE_UPLOAD_BPS + self.jitter(FAKE_UPLOAD_JITTER_BPS);
        let ping = FAKE_PING_MS + self.jitter(FAKE_PING_JITTER_MS);

        Ok(MeasurementRecord::new(
            ping,
            download,
            upload,
            FAKE_SERVER,
            &Local::now(),
        ))
    }

    fn label(&self) -> &'static str {
        "Faking"
    }
}
