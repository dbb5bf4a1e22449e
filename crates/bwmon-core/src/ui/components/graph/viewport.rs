//! Chart box and axis scaling
//!
//! Handles the mapping from display-unit values to pixel offsets within a
//! fixed chart box.

use embedded_graphics::prelude::*;

use super::constants::{AXIS_OFFSET_X_PX, PLOT_INSET_X_PX, PLOT_INSET_Y_PX};

/// Fixed drawing rectangle for one chart, in screen coordinates.
///
/// `origin_y` is the bottom of the chart (screen Y grows downward) and
/// `height` extends upward from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBox {
    /// Left edge, where the labels start
    pub origin_x: i32,
    /// Bottom edge, where the horizontal axis is drawn
    pub origin_y: i32,
    /// Right end of the horizontal axis
    pub end_x: i32,
    /// Height of the value range in pixels
    pub height: i32,
}

impl ChartBox {
    /// Create a new chart box
    pub const fn new(origin_x: i32, origin_y: i32, end_x: i32, height: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            end_x,
            height,
        }
    }

    /// X coordinate of the vertical axis
    pub const fn axis_x(&self) -> i32 {
        self.origin_x + AXIS_OFFSET_X_PX
    }

    /// X coordinate of the first plotted point
    pub const fn plot_left(&self) -> i32 {
        self.axis_x() + PLOT_INSET_X_PX
    }

    /// Y coordinate a value equal to the min label maps to
    pub const fn plot_baseline(&self) -> i32 {
        self.origin_y - PLOT_INSET_Y_PX
    }

    /// Horizontal space shared by the plotted points
    pub const fn plot_width(&self) -> i32 {
        self.end_x - self.plot_left()
    }

    /// Top end of the vertical axis
    pub const fn axis_top(&self) -> Point {
        Point::new(self.axis_x(), self.origin_y - self.height)
    }

    /// Corner where both axes meet
    pub const fn axis_corner(&self) -> Point {
        Point::new(self.axis_x(), self.origin_y)
    }

    /// Right end of the horizontal axis
    pub const fn axis_end(&self) -> Point {
        Point::new(self.end_x, self.origin_y)
    }
}

/// Integer axis bounds derived from a series, also used as the axis labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScale {
    /// Floor of the smallest value
    pub min: i64,
    /// Ceiling of the largest value
    pub max: i64,
}

impl AxisScale {
    /// Create a scale from explicit bounds
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Compute `floor(min)` and `ceil(max)` of `values`.
    ///
    /// Returns `None` for an empty slice. Non-finite values are ignored.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (lo, hi) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        Some(Self {
            min: lo.floor() as i64,
            max: hi.ceil() as i64,
        })
    }

    /// Whether min and max labels coincide (every value is the same integer)
    pub const fn is_flat(&self) -> bool {
        self.min == self.max
    }

    /// Pixel offset above the baseline for `value` within a range `height` px tall.
    ///
    /// A flat scale has no range to divide by; every value sits at mid-height.
    pub fn offset(&self, value: f64, height: i32) -> i32 {
        let height = f64::from(height);
        if self.is_flat() {
            return (height / 2.0).round_ties_even() as i32;
        }

        let range = (self.max - self.min) as f64;
        (height * (value - self.min as f64) / range).round_ties_even() as i32
    }
}
