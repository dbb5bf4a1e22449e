//! Chart component with `Drawable` implementation

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;

use super::axis::{draw_axis_labels, draw_axis_lines};
use super::constants::SERIES_LINE_WIDTH_PX;
use super::projection::{ChartGeometry, ChartProjector};
use super::viewport::ChartBox;

/// A labelled line chart of one series
///
/// Drawing a series with fewer than two values draws nothing.
pub struct Chart<'a> {
    projector: ChartProjector,
    values: &'a [f64],
    axis_letter: &'a str,
}

const INK: BinaryColor = BinaryColor::On;

impl<'a> Chart<'a> {
    /// Create a chart of `values` (bits per second) inside `chart_box`
    pub fn new(chart_box: ChartBox, values: &'a [f64], axis_letter: &'a str) -> Self {
        Self {
            projector: ChartProjector::new(chart_box),
            values,
            axis_letter,
        }
    }

    /// Projected geometry, if the series is long enough to draw
    pub fn geometry(&self) -> Option<ChartGeometry> {
        self.projector.project(self.values)
    }
}

impl Drawable for Chart<'_> {
    type Color = BinaryColor;
    type Output = ();

    fn draw<D>(&self, display: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let Some(geometry) = self.geometry() else {
            return Ok(());
        };

        let chart_box = self.projector.chart_box();
        draw_axis_labels(&chart_box, &geometry, self.axis_letter, INK, display)?;
        draw_axis_lines(&geometry, INK, display)?;

        let series_style = PrimitiveStyle::with_stroke(INK, SERIES_LINE_WIDTH_PX);
        for segment in geometry.segments() {
            segment.into_styled(series_style).draw(display)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    const BOX: ChartBox = ChartBox::new(5, 180, 390, 70);

    #[test]
    fn test_short_series_draws_nothing() {
        let mut frame = FrameBuffer::new();
        Chart::new(BOX, &[1e6], "D").draw(&mut frame).unwrap();
        assert_eq!(frame.count_on(), 0);
    }

    #[test]
    fn test_chart_draws_axes_and_segments() {
        let mut frame = FrameBuffer::new();
        let values = [1e6, 3e6, 2e6];
        let chart = Chart::new(BOX, &values, "D");
        chart.draw(&mut frame).unwrap();

        // Axis corner and far end of the baseline.
        assert_eq!(frame.pixel(25, 180), Some(BinaryColor::On));
        assert_eq!(frame.pixel(389, 180), Some(BinaryColor::On));

        // Every projected point is inked.
        let geometry = chart.geometry().unwrap();
        for p in &geometry.points {
            assert_eq!(frame.pixel(p.x, p.y), Some(BinaryColor::On), "{p:?}");
        }
    }

    #[test]
    fn test_flat_series_draws_without_panicking() {
        let mut frame = FrameBuffer::new();
        Chart::new(BOX, &[20e6; 10], "U").draw(&mut frame).unwrap();

        let mid_y = BOX.plot_baseline() - BOX.height / 2;
        assert_eq!(frame.pixel(BOX.plot_left(), mid_y), Some(BinaryColor::On));
    }
}
