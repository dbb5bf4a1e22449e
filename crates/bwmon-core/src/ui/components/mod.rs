pub mod graph;

pub use graph::{AxisScale, Chart, ChartBox, ChartGeometry, ChartProjector};
