//! Line chart rendering for the monochrome panel
//!
//! Charts are deliberately simple: one series, integer min/max labels on the
//! left, a vertical and a horizontal axis line, and the series drawn as
//! straight segments between consecutive points.
//!
//! Work is split in two steps:
//!
//! - [`ChartProjector`] turns raw values (bits per second) into pixel-space
//!   [`ChartGeometry`]. This is pure and holds all the numeric edge cases.
//! - [`Chart`] draws that geometry plus its labels onto any
//!   `DrawTarget<Color = BinaryColor>`.
//!
//! # Examples
//!
//! ```
//! use bwmon_core::ui::components::graph::{ChartBox, ChartProjector};
//!
//! let projector = ChartProjector::new(ChartBox::new(5, 180, 390, 70));
//! let geometry = projector
//!     .project(&[1_000_000.0, 2_000_000.0, 3_000_000.0])
//!     .expect("three points are drawable");
//!
//! assert_eq!((geometry.scale.min, geometry.scale.max), (1, 3));
//! assert_eq!(geometry.points.len(), 3);
//! ```

mod axis;
mod component;
pub mod constants;
mod projection;
pub mod viewport;

pub use axis::format_label;
pub use component::Chart;
pub use projection::{ChartGeometry, ChartProjector};
pub use viewport::{AxisScale, ChartBox};
