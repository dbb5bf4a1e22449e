//! Display collaborator interface
//!
//! A [`DisplaySink`] takes a finished [`FrameBuffer`] and performs the physical
//! refresh (or an equivalent for mock and test runs).

use embedded_graphics::pixelcolor::BinaryColor;

use crate::error::DisplayError;
use crate::framebuffer::FrameBuffer;

/// Border color of the e-paper panel around the active area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Ink-colored border
    Black,
    /// Paper-colored border
    White,
}

impl Border {
    /// Equivalent framebuffer color
    pub const fn color(self) -> BinaryColor {
        match self {
            Self::Black => BinaryColor::On,
            Self::White => BinaryColor::Off,
        }
    }

    /// Short label for logs
    pub const fn label(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Something that can show a rendered frame
pub trait DisplaySink {
    /// Show `frame` with the given border color, blocking until the refresh is done.
    fn show(&mut self, frame: &FrameBuffer, border: Border) -> Result<(), DisplayError>;
}

/// Sink that keeps the last frame in memory (tests and dry runs)
#[derive(Default)]
pub struct MemorySink {
    /// Last frame shown, with its border
    pub last: Option<(FrameBuffer, Border)>,
    /// Number of frames shown
    pub refreshes: usize,
}

impl DisplaySink for MemorySink {
    fn show(&mut self, frame: &FrameBuffer, border: Border) -> Result<(), DisplayError> {
        self.last = Some((frame.clone(), border));
        self.refreshes += 1;
        Ok(())
    }
}
