//! Display sinks for the three panel modes.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettings, OutputSettingsBuilder, SimulatorDisplay,
};
use log::info;

use bwmon_core::display::{Border, DisplaySink};
use bwmon_core::framebuffer::FrameBuffer;
use bwmon_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use bwmon_core::DisplayError;

/// Which sink the run hands its frame to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Write the frame for the e-paper panel driver
    Panel,
    /// Show the frame in the simulator
    Mock,
    /// No display, rendering is skipped
    Headless,
}

/// Writes each frame as a PBM bitmap for the external panel refresh helper.
pub struct PanelFrameSink {
    path: PathBuf,
}

impl PanelFrameSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DisplaySink for PanelFrameSink {
    fn show(&mut self, frame: &FrameBuffer, border: Border) -> Result<(), DisplayError> {
        fs::write(&self.path, frame.to_pbm())?;
        info!(
            "Frame written to {} ({} border)",
            self.path.display(),
            border.label()
        );
        Ok(())
    }
}

/// Mirrors each frame into an `embedded-graphics-simulator` display.
///
/// The frame is always saved as a PNG preview. With the `window` feature it is
/// also shown in an SDL window, held open for the configured delay.
pub struct MockSink {
    preview: PathBuf,
    hold: Option<Duration>,
}

/// Pixel scale factor for the mock output.
const MOCK_SCALE: u32 = 2;

/// Width of the panel border drawn around the mock frame.
const MOCK_BORDER_PX: u32 = 4;

impl MockSink {
    pub fn new(preview: PathBuf, hold: Option<Duration>) -> Self {
        Self { preview, hold }
    }

    #[cfg(feature = "window")]
    fn hold_window(
        &self,
        display: &SimulatorDisplay<BinaryColor>,
        settings: &OutputSettings,
    ) -> Result<(), DisplayError> {
        use std::time::Instant;

        use embedded_graphics_simulator::{SimulatorEvent, Window};

        /// Target frame duration while the window is open (~30 FPS).
        const FRAME_DURATION: Duration = Duration::from_millis(33);

        let mut window = Window::new("bwmon (mock)", settings);
        // The SDL window is lazily initialized on the first `update()` call.
        window.update(display);

        let deadline = Instant::now() + self.hold.unwrap_or_default();
        while Instant::now() < deadline {
            if window.events().any(|e| matches!(e, SimulatorEvent::Quit)) {
                break;
            }
            window.update(display);
            std::thread::sleep(FRAME_DURATION);
        }
        Ok(())
    }

    #[cfg(not(feature = "window"))]
    fn hold_window(
        &self,
        _display: &SimulatorDisplay<BinaryColor>,
        _settings: &OutputSettings,
    ) -> Result<(), DisplayError> {
        if let Some(hold) = self.hold {
            std::thread::sleep(hold);
        }
        Ok(())
    }
}

impl DisplaySink for MockSink {
    fn show(&mut self, frame: &FrameBuffer, border: Border) -> Result<(), DisplayError> {
        let border_px = MOCK_BORDER_PX as i32;
        let mut display = SimulatorDisplay::<BinaryColor>::new(Size::new(
            DISPLAY_WIDTH_PX + 2 * MOCK_BORDER_PX,
            DISPLAY_HEIGHT_PX + 2 * MOCK_BORDER_PX,
        ));
        display
            .clear(border.color())
            .unwrap_or_else(|never| match never {});
        frame
            .flush(&mut display.translated(Point::new(border_px, border_px)))
            .unwrap_or_else(|never| match never {});

        let settings = OutputSettingsBuilder::new()
            .scale(MOCK_SCALE)
            .theme(BinaryColorTheme::LcdWhite)
            .build();

        display
            .to_rgb_output_image(&settings)
            .save_png(&self.preview)
            .map_err(|e| DisplayError::Unavailable(e.to_string()))?;
        info!(
            "Mock frame saved to {} ({} border)",
            self.preview.display(),
            border.label()
        );

        self.hold_window(&display, &settings)
    }
}
