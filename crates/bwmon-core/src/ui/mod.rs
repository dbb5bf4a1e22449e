//! Drawing components for the e-paper report

pub mod components;

/// Panel width in pixels (Inky wHAT class e-paper)
pub const DISPLAY_WIDTH_PX: u32 = 400;

/// Panel height in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 300;
