//! Layout constants for the report page
//!
//! All positions are absolute panel coordinates in pixels, with text anchored
//! at its top-left corner.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15, FONT_10X20};
use embedded_graphics::prelude::*;

use crate::ui::components::ChartBox;

// ============================================================================
// Header
// ============================================================================

/// Top-left corner of the filled header bar
pub const HEADER_TOP_LEFT: Point = Point::new(5, 6);

/// Bottom-right corner of the filled header bar (inclusive)
pub const HEADER_BOTTOM_RIGHT: Point = Point::new(395, 48);

/// Header title position
pub const HEADER_TITLE_POS: Point = Point::new(20, 12);

/// Header title text
pub const HEADER_TITLE: &str = "Internet Bandwidth Monitor";

// ============================================================================
// Readouts
// ============================================================================

/// Y of the readout captions ("Ping:", "Download:", "Upload:")
pub const READOUT_LABEL_Y_PX: i32 = 53;

/// Y of the readout values
pub const READOUT_VALUE_Y_PX: i32 = 72;

/// Y of the readout units
pub const READOUT_UNIT_Y_PX: i32 = 85;

/// X of the ping readout
pub const PING_X_PX: i32 = 10;

/// X of the ping unit
pub const PING_UNIT_X_PX: i32 = 70;

/// X of the download readout
pub const DOWNLOAD_X_PX: i32 = 120;

/// X of the download unit
pub const DOWNLOAD_UNIT_X_PX: i32 = 195;

/// X of the upload readout
pub const UPLOAD_X_PX: i32 = 260;

/// X of the upload unit
pub const UPLOAD_UNIT_X_PX: i32 = 335;

// ============================================================================
// Footer
// ============================================================================

/// Server name position
pub const FOOTER_SERVER_POS: Point = Point::new(10, 270);

/// Timestamp position
pub const FOOTER_TIMESTAMP_POS: Point = Point::new(190, 270);

// ============================================================================
// Charts
// ============================================================================

/// Download history chart
pub const DOWNLOAD_CHART_BOX: ChartBox = ChartBox::new(5, 180, 390, 70);

/// Upload history chart
pub const UPLOAD_CHART_BOX: ChartBox = ChartBox::new(5, 260, 390, 70);

// ============================================================================
// Fonts
// ============================================================================

/// Header title font
pub const TITLE_FONT: &MonoFont<'static> = &FONT_10X20;

/// Readout caption font ("Ping:", "Download:", "Upload:")
pub const CAPTION_FONT: &MonoFont<'static> = &FONT_9X15;

/// Readout value font
pub const VALUE_FONT: &MonoFont<'static> = &FONT_10X20;

/// Readout unit font ("ms", "Mbps")
pub const UNIT_FONT: &MonoFont<'static> = &FONT_6X10;

/// Footer font (server name, timestamp)
pub const FOOTER_FONT: &MonoFont<'static> = &FONT_9X15;
