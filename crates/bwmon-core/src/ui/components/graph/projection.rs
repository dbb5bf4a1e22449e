//! Projection of a raw series into pixel-space chart geometry

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Line;

use crate::record::to_display_unit;

use super::constants::MIN_CHART_POINTS;
use super::viewport::{AxisScale, ChartBox};

/// Pixel-space result of projecting one series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    /// One point per input value, in input order
    pub points: Vec<Point>,
    /// Vertical axis along the left edge of the plot
    pub y_axis: Line,
    /// Horizontal axis along the bottom of the box
    pub x_axis: Line,
    /// Integer min/max labels the points were scaled against
    pub scale: AxisScale,
}

impl ChartGeometry {
    /// Segments joining each point to the next one
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|pair| Line::new(pair[0], pair[1]))
    }
}

/// Maps a series of bits-per-second values into a fixed [`ChartBox`]
#[derive(Debug, Clone, Copy)]
pub struct ChartProjector {
    chart_box: ChartBox,
}

impl ChartProjector {
    /// Create a projector for the given box
    pub const fn new(chart_box: ChartBox) -> Self {
        Self { chart_box }
    }

    /// The box this projector draws into
    pub const fn chart_box(&self) -> ChartBox {
        self.chart_box
    }

    /// Project `values` (bits per second) into chart geometry.
    ///
    /// Values are converted to the display unit before scaling so the labels
    /// and the plotted points agree. Returns `None` when there is nothing to
    /// draw (fewer than two values).
    pub fn project(&self, values: &[f64]) -> Option<ChartGeometry> {
        if values.len() < MIN_CHART_POINTS {
            return None;
        }

        let converted: Vec<f64> = values.iter().copied().map(to_display_unit).collect();
        let scale = AxisScale::from_values(&converted)?;

        let chart_box = &self.chart_box;
        let left = f64::from(chart_box.plot_left());
        let baseline = chart_box.plot_baseline();
        let offset_x = f64::from(chart_box.plot_width()) / converted.len() as f64;

        let points = converted
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = (left + i as f64 * offset_x).round_ties_even() as i32;
                let y = baseline - scale.offset(value, chart_box.height);
                Point::new(x, y)
            })
            .collect();

        Some(ChartGeometry {
            points,
            y_axis: Line::new(chart_box.axis_top(), chart_box.axis_corner()),
            x_axis: Line::new(chart_box.axis_corner(), chart_box.axis_end()),
            scale,
        })
    }
}
