//! Axis lines and label rendering
//!
//! Labels sit in the gutter left of the vertical axis: the max label at the
//! top, the axis letter in the middle and the min label at the bottom.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use super::constants::{
    AXIS_LETTER_FONT, AXIS_LETTER_OFFSET_Y_PX, AXIS_LINE_WIDTH_PX, LABEL_FONT,
    MAX_AXIS_LABEL_LENGTH, MAX_LABEL_OFFSET_Y_PX, MIN_LABEL_OFFSET_Y_PX,
};
use super::projection::ChartGeometry;
use super::viewport::ChartBox;

/// Format an integer axis label.
///
/// Uses a fixed-capacity heapless String sized for the longest `i64`.
pub fn format_label(value: i64) -> String<MAX_AXIS_LABEL_LENGTH> {
    let mut s = String::new();
    let _ = core::fmt::write(&mut s, format_args!("{}", value));
    s
}

/// Draw the vertical and horizontal axis lines
pub(super) fn draw_axis_lines<D: DrawTarget<Color = BinaryColor>>(
    geometry: &ChartGeometry,
    color: BinaryColor,
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(color, AXIS_LINE_WIDTH_PX);
    geometry.y_axis.into_styled(style).draw(display)?;
    geometry.x_axis.into_styled(style).draw(display)?;
    Ok(())
}

/// Draw the min/max labels and the axis letter
pub(super) fn draw_axis_labels<D: DrawTarget<Color = BinaryColor>>(
    chart_box: &ChartBox,
    geometry: &ChartGeometry,
    axis_letter: &str,
    color: BinaryColor,
    display: &mut D,
) -> Result<(), D::Error> {
    let label_style = MonoTextStyle::new(LABEL_FONT, color);
    let letter_style = MonoTextStyle::new(AXIS_LETTER_FONT, color);

    let min_label = format_label(geometry.scale.min);
    Text::with_baseline(
        min_label.as_str(),
        Point::new(
            chart_box.origin_x,
            chart_box.origin_y - MIN_LABEL_OFFSET_Y_PX,
        ),
        label_style,
        Baseline::Top,
    )
    .draw(display)?;

    let max_label = format_label(geometry.scale.max);
    Text::with_baseline(
        max_label.as_str(),
        Point::new(
            chart_box.origin_x,
            chart_box.origin_y - chart_box.height - MAX_LABEL_OFFSET_Y_PX,
        ),
        label_style,
        Baseline::Top,
    )
    .draw(display)?;

    Text::with_baseline(
        axis_letter,
        Point::new(
            chart_box.origin_x,
            chart_box.origin_y - chart_box.height / 2 - AXIS_LETTER_OFFSET_Y_PX,
        ),
        letter_style,
        Baseline::Top,
    )
    .draw(display)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(0).as_str(), "0");
        assert_eq!(format_label(65).as_str(), "65");
        assert_eq!(format_label(-3).as_str(), "-3");
        assert_eq!(format_label(1_000_000).as_str(), "1000000");
    }

    #[test]
    fn test_format_label_extremes_fit() {
        assert_eq!(format_label(i64::MIN).as_str(), "-9223372036854775808");
        assert_eq!(format_label(i64::MAX).as_str(), "9223372036854775807");
    }
}
