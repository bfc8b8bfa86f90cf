//! Chart-space mapping for simulation charts (space-time, speed-space).
//!
//! Drawing functions never touch a rendering library: they map records
//! through a [`CoordinateMapper`] and return [`DrawCommand`]s. A [`Scene`]
//! retains the result, and back ends render it.

pub mod command;
pub mod curve;
pub mod draw;
pub mod fields;
pub mod scale;

pub use command::{Color, DrawCommand, DrawSurface, Element, Group, Point, Scene, Shape, Style};
pub use curve::{Curve, CurveError};
pub use draw::{Label, Layer, draw_area, draw_curve, draw_guidelines, draw_marker, draw_rect, draw_text};
pub use fields::{AxisKeys, Fields, SimulationPoint};
pub use scale::{Chart, CoordinateMapper, LinearScale, extent};
