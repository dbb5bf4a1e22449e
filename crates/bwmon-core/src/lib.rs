//! Hardware-independent core library for bwmon
//!
//! This crate contains all platform-agnostic logic for the bwmon e-paper
//! bandwidth monitor: the measurement record, the bounded history store and its
//! CSV export, chart projection, report rendering into a monochrome
//! framebuffer, and the single-shot run orchestrator.
//!
//! The measurement itself and the physical panel are reached through the
//! [`measurement::MeasurementSource`] and [`display::DisplaySink`] traits so the
//! whole run can be exercised on a desktop host and in tests.

pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod measurement;
pub mod monitor;
pub mod pages;
pub mod record;
pub mod storage;
pub mod ui;

pub use config::MonitorConfig;
pub use error::{DisplayError, ExportError, HistoryError, MeasurementError, MonitorError};
pub use record::MeasurementRecord;
