//! Monochrome framebuffer for the e-paper panel.
//!
//! The report is drawn into this RAM buffer first. The finished frame is then
//! handed to a [`DisplaySink`](crate::display::DisplaySink), which either
//! pushes it to the panel, mirrors it into a simulator, or writes it out as a
//! bitmap file.
//!
//! `BinaryColor::Off` is the background (paper) and `BinaryColor::On` is ink.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Total number of pixels in the framebuffer (400 x 300 = 120,000).
const PIXEL_COUNT: usize = DISPLAY_WIDTH_PX as usize * DISPLAY_HEIGHT_PX as usize;

/// Bytes per packed row (1 bit per pixel, rows padded to a whole byte)
const PACKED_ROW_BYTES: usize = (DISPLAY_WIDTH_PX as usize).div_ceil(8);

/// Full-panel framebuffer implementing `DrawTarget<Color = BinaryColor>`.
#[derive(Clone)]
pub struct FrameBuffer {
    pixels: Vec<BinaryColor>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a new framebuffer filled with background pixels.
    pub fn new() -> Self {
        Self {
            pixels: vec![BinaryColor::Off; PIXEL_COUNT],
        }
    }

    /// Color of the pixel at (`x`, `y`), or `None` if outside the panel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        Self::index(x, y).map(|idx| self.pixels[idx])
    }

    /// Number of inked pixels
    pub fn count_on(&self) -> usize {
        self.pixels.iter().filter(|c| c.is_on()).count()
    }

    /// Row-major iterator over every pixel color
    pub fn colors(&self) -> impl Iterator<Item = BinaryColor> + '_ {
        self.pixels.iter().copied()
    }

    /// Pack the frame 1 bit per pixel, MSB first, row-major, ink = 1.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let width = DISPLAY_WIDTH_PX as usize;
        let mut packed = vec![0u8; PACKED_ROW_BYTES * DISPLAY_HEIGHT_PX as usize];

        for (idx, color) in self.pixels.iter().enumerate() {
            if color.is_on() {
                let (y, x) = (idx / width, idx % width);
                packed[y * PACKED_ROW_BYTES + x / 8] |= 0x80 >> (x % 8);
            }
        }
        packed
    }

    /// Encode the frame as a binary PBM (P4) image.
    pub fn to_pbm(&self) -> Vec<u8> {
        let mut out = format!("P4\n{} {}\n", DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX).into_bytes();
        out.extend_from_slice(&self.to_packed_bytes());
        out
    }

    /// Copy the whole frame onto another display.
    pub fn flush<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        debug!(
            "Flushing {}x{} frame ({} ink pixels)",
            DISPLAY_WIDTH_PX,
            DISPLAY_HEIGHT_PX,
            self.count_on()
        );
        display.fill_contiguous(&self.bounding_box(), self.colors())
    }

    #[inline]
    fn index(x: i32, y: i32) -> Option<usize> {
        let (w, h) = (DISPLAY_WIDTH_PX as i32, DISPLAY_HEIGHT_PX as i32);
        if x >= 0 && y >= 0 && x < w && y < h {
            Some(y as usize * w as usize + x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = Self::index(coord.x, coord.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                if let Some(idx) = Self::index(x, y) {
                    self.pixels[idx] = color;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}
