//! Single-shot internet bandwidth monitor.
//!
//! Each invocation takes one speed measurement, appends it to the JSON history,
//! optionally appends a CSV row, and refreshes the e-paper report. Schedule it
//! externally (cron, systemd timer) for periodic monitoring.
//!
//! # Display modes
//!
//! | Flag         | Sink                                         |
//! |--------------|----------------------------------------------|
//! | (none)       | PBM frame for the panel driver (`--frame`)   |
//! | `--mock`     | Simulator preview (`--preview`, SDL window)  |
//! | `--headless` | No rendering                                 |

mod sinks;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;

use bwmon_core::MonitorConfig;
use bwmon_core::display::DisplaySink;
use bwmon_core::measurement::{
    FakeSpeedtest, MeasurementSource, SPEEDTEST_PROGRAM, SpeedtestCli,
};
use bwmon_core::monitor::run_once;

use crate::sinks::{DisplayMode, MockSink, PanelFrameSink};

#[derive(Debug, Parser)]
#[command(name = "bwmon", version, about = "Measure bandwidth and refresh the report panel")]
struct Cli {
    /// Render to the simulator instead of the panel
    #[arg(long, conflicts_with = "headless")]
    mock: bool,

    /// Skip rendering entirely
    #[arg(long)]
    headless: bool,

    /// Use synthetic measurements instead of running speedtest-cli
    #[arg(long)]
    fake: bool,

    /// JSON history file
    #[arg(long, value_name = "PATH")]
    history: PathBuf,

    /// Also append each measurement to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Seconds to hold the mock display open
    #[arg(long, value_name = "SECONDS")]
    delay: Option<u64>,

    /// Where the panel frame is written
    #[arg(long, value_name = "PATH", default_value = "bwmon-frame.pbm")]
    frame: PathBuf,

    /// Where the mock preview image is written
    #[arg(long, value_name = "PATH", default_value = "bwmon-preview.png")]
    preview: PathBuf,

    /// speedtest-cli executable
    #[arg(long, value_name = "PROGRAM", default_value = SPEEDTEST_PROGRAM)]
    speedtest_bin: String,
}

impl Cli {
    fn display_mode(&self) -> DisplayMode {
        match (self.mock, self.headless) {
            (_, true) => DisplayMode::Headless,
            (true, false) => DisplayMode::Mock,
            (false, false) => DisplayMode::Panel,
        }
    }

    fn source(&self) -> Box<dyn MeasurementSource> {
        if self.fake {
            Box::new(FakeSpeedtest::new())
        } else {
            Box::new(SpeedtestCli::new(self.speedtest_bin.clone()))
        }
    }

    fn sink(&self) -> Option<Box<dyn DisplaySink>> {
        match self.display_mode() {
            DisplayMode::Panel => Some(Box::new(PanelFrameSink::new(self.frame.clone()))),
            DisplayMode::Mock => Some(Box::new(MockSink::new(
                self.preview.clone(),
                self.delay.map(Duration::from_secs),
            ))),
            DisplayMode::Headless => None,
        }
    }

    fn config(&self) -> MonitorConfig {
        let config = MonitorConfig::new(&self.history);
        match &self.csv {
            Some(path) => config.with_csv(path),
            None => config,
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{} - {}", buf.timestamp(), record.args()))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    info!("Starting bwmon ({:?} display)", cli.display_mode());

    let config = cli.config();
    let mut source = cli.source();
    let mut sink = cli.sink();

    let display: Option<&mut dyn DisplaySink> = match &mut sink {
        Some(sink) => Some(sink.as_mut()),
        None => None,
    };

    let outcome = run_once(&config, source.as_mut(), display).with_context(|| {
        format!(
            "monitor run failed (history: {})",
            config.history_path.display()
        )
    })?;

    info!(
        "Recorded {:.2} Mbps down / {:.2} Mbps up, {} entries in history",
        outcome.record.download_mbps(),
        outcome.record.upload_mbps(),
        outcome.history_len
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mode_flags() {
        let cli = Cli::try_parse_from(["bwmon", "--history", "h.json"]).unwrap();
        assert_eq!(cli.display_mode(), DisplayMode::Panel);

        let cli = Cli::try_parse_from(["bwmon", "--history", "h.json", "--mock"]).unwrap();
        assert_eq!(cli.display_mode(), DisplayMode::Mock);

        let cli = Cli::try_parse_from(["bwmon", "--history", "h.json", "--headless"]).unwrap();
        assert_eq!(cli.display_mode(), DisplayMode::Headless);
        assert!(cli.sink().is_none());
    }

    #[test]
    fn test_mock_and_headless_conflict() {
        let err = Cli::try_parse_from(["bwmon", "--history", "h.json", "--mock", "--headless"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_history_is_required() {
        assert!(Cli::try_parse_from(["bwmon", "--fake"]).is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let cli = Cli::try_parse_from([
            "bwmon", "--history", "h.json", "--csv", "h.csv", "--delay", "5",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.history_path, PathBuf::from("h.json"));
        assert_eq!(config.csv_path, Some(PathBuf::from("h.csv")));
        assert_eq!(cli.delay, Some(5));
        assert_eq!(cli.speedtest_bin, "speedtest-cli");
    }

    #[test]
    fn test_fake_source_label() {
        let cli = Cli::try_parse_from(["bwmon", "--history", "h.json", "--fake"]).unwrap();
        assert_eq!(cli.source().label(), "Faking");

        let cli = Cli::try_parse_from(["bwmon", "--history", "h.json"]).unwrap();
        assert_eq!(cli.source().label(), "Running");
    }
}
