//! Report page: latest measurement plus download/upload trend charts.
//!
//! Layout (400 x 300):
//! - Header bar with the title in reverse video
//! - Ping / Download / Upload readouts
//! - Download chart, then upload chart
//! - Footer with the server name and the measurement timestamp

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::framebuffer::FrameBuffer;
use crate::pages::constants::*;
use crate::record::MeasurementRecord;
use crate::storage::{download_series, upload_series};
use crate::ui::components::Chart;

const INK: BinaryColor = BinaryColor::On;
const PAPER: BinaryColor = BinaryColor::Off;

/// Renders one measurement and the trailing history
pub struct ReportPage<'a> {
    current: &'a MeasurementRecord,
    download: Vec<f64>,
    upload: Vec<f64>,
}

impl<'a> ReportPage<'a> {
    /// Create the page for `current`, charting `history` (oldest first).
    pub fn new(current: &'a MeasurementRecord, history: &[MeasurementRecord]) -> Self {
        Self {
            current,
            download: download_series(history),
            upload: upload_series(history),
        }
    }

    /// Render the page into a fresh framebuffer.
    pub fn render(&self) -> FrameBuffer {
        let mut frame = FrameBuffer::new();
        self.draw(&mut frame).unwrap_or_else(|never| match never {});
        frame
    }

    fn draw_header<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        Rectangle::with_corners(HEADER_TOP_LEFT, HEADER_BOTTOM_RIGHT)
            .into_styled(PrimitiveStyle::with_fill(INK))
            .draw(display)?;
        draw_text(HEADER_TITLE, HEADER_TITLE_POS, TITLE_FONT, PAPER, display)
    }

    fn draw_readouts<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let readouts = [
            ("Ping:", format_ping(self.current.ping), "ms", PING_X_PX, PING_UNIT_X_PX),
            (
                "Download:",
                format!("{:5.2}", self.current.download_mbps()),
                "Mbps",
                DOWNLOAD_X_PX,
                DOWNLOAD_UNIT_X_PX,
            ),
            (
                "Upload:",
                format!("{:4.2}", self.current.upload_mbps()),
                "Mbps",
                UPLOAD_X_PX,
                UPLOAD_UNIT_X_PX,
            ),
        ];

        for (caption, value, unit, x, unit_x) in &readouts {
            draw_text(caption, Point::new(*x, READOUT_LABEL_Y_PX), CAPTION_FONT, INK, display)?;
            draw_text(value, Point::new(*x, READOUT_VALUE_Y_PX), VALUE_FONT, INK, display)?;
            draw_text(unit, Point::new(*unit_x, READOUT_UNIT_Y_PX), UNIT_FONT, INK, display)?;
        }
        Ok(())
    }

    fn draw_footer<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_text(&self.current.server, FOOTER_SERVER_POS, FOOTER_FONT, INK, display)?;
        draw_text(
            &self.current.timestamp,
            FOOTER_TIMESTAMP_POS,
            FOOTER_FONT,
            INK,
            display,
        )
    }
}

impl Drawable for ReportPage<'_> {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D>(&self, display: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        display.clear(PAPER)?;

        self.draw_header(display)?;
        self.draw_readouts(display)?;
        self.draw_footer(display)?;

        Chart::new(DOWNLOAD_CHART_BOX, &self.download, "D").draw(display)?;
        Chart::new(UPLOAD_CHART_BOX, &self.upload, "U").draw(display)?;

        Ok(())
    }
}

/// Ping readout: one decimal, no padding
fn format_ping(ping_ms: f64) -> String {
    format!("{:5.1}", ping_ms).trim().to_string()
}

fn draw_text<D: DrawTarget<Color = BinaryColor>>(
    text: &str,
    position: Point,
    font: &'static MonoFont<'static>,
    color: BinaryColor,
    display: &mut D,
) -> Result<(), D::Error> {
    Text::with_baseline(
        text,
        position,
        MonoTextStyle::new(font, color),
        Baseline::Top,
    )
    .draw(display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(download: f64, upload: f64) -> MeasurementRecord {
        MeasurementRecord {
            ping: 24.259,
            download,
            upload,
            server: "Montreal, QC".into(),
            timestamp: "Jan 01 2024 @ 00:00:00".into(),
        }
    }

    #[test]
    fn test_format_ping() {
        assert_eq!(format_ping(24.259), "24.3");
        assert_eq!(format_ping(5.0), "5.0");
        assert_eq!(format_ping(123.44), "123.4");
    }

    #[test]
    fn test_header_bar_is_inked() {
        let current = record(65e6, 11e6);
        let frame = ReportPage::new(&current, &[]).render();

        // Corners of the header bar, away from the title glyphs.
        assert_eq!(frame.pixel(5, 6), Some(BinaryColor::On));
        assert_eq!(frame.pixel(395, 48), Some(BinaryColor::On));
        assert_eq!(frame.pixel(4, 6), Some(BinaryColor::Off));
    }

    #[test]
    fn test_short_history_skips_charts() {
        let current = record(65e6, 11e6);
        let history = vec![current.clone()];
        let frame = ReportPage::new(&current, &history).render();

        let corner = DOWNLOAD_CHART_BOX.axis_corner();
        assert_eq!(frame.pixel(corner.x, corner.y), Some(BinaryColor::Off));
        let corner = UPLOAD_CHART_BOX.axis_corner();
        assert_eq!(frame.pixel(corner.x, corner.y), Some(BinaryColor::Off));
    }

    #[test]
    fn test_history_draws_both_charts() {
        let history = vec![record(60e6, 10e6), record(70e6, 12e6), record(65e6, 11e6)];
        let current = history[2].clone();
        let frame = ReportPage::new(&current, &history).render();

        let corner = DOWNLOAD_CHART_BOX.axis_corner();
        assert_eq!(frame.pixel(corner.x, corner.y), Some(BinaryColor::On));
        let corner = UPLOAD_CHART_BOX.axis_corner();
        assert_eq!(frame.pixel(corner.x, corner.y), Some(BinaryColor::On));
    }

    #[test]
    fn test_render_is_deterministic() {
        let history = vec![record(60e6, 10e6), record(70e6, 12e6)];
        let a = ReportPage::new(&history[1], &history).render();
        let b = ReportPage::new(&history[1], &history).render();
        assert_eq!(a.to_packed_bytes(), b.to_packed_bytes());
    }
}
