//! Constants for chart rendering
//!
//! Offsets are relative to the chart's [`ChartBox`](super::ChartBox) and are
//! all in pixels.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};

/// Horizontal gap between the box origin and the vertical axis (label gutter)
pub const AXIS_OFFSET_X_PX: i32 = 20;

/// Horizontal gap between the vertical axis and the first plotted point
pub const PLOT_INSET_X_PX: i32 = 10;

/// Vertical gap between the horizontal axis and the plot baseline
pub const PLOT_INSET_Y_PX: i32 = 5;

/// Stroke width of both axis lines
pub const AXIS_LINE_WIDTH_PX: u32 = 3;

/// Stroke width of series segments
pub const SERIES_LINE_WIDTH_PX: u32 = 1;

/// Offset of the min label above the box origin
pub const MIN_LABEL_OFFSET_Y_PX: i32 = 12;

/// Offset of the max label above the top of the box
pub const MAX_LABEL_OFFSET_Y_PX: i32 = 5;

/// Offset of the axis letter above the vertical middle of the box
pub const AXIS_LETTER_OFFSET_Y_PX: i32 = 17;

/// Font for the min/max labels
pub const LABEL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Font for the axis letter ("D", "U")
pub const AXIS_LETTER_FONT: &MonoFont<'static> = &FONT_10X20;

/// Maximum length of formatted axis labels (characters), enough for any `i64`
pub const MAX_AXIS_LABEL_LENGTH: usize = 20;

/// Minimum number of values needed to draw a line
pub const MIN_CHART_POINTS: usize = 2;
