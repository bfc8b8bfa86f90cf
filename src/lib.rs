//! Railway simulation chart toolkit.
//!
//! Unit helpers, interval classification and chart-space drawing live in
//! the workspace crates re-exported here; this crate adds the plotters
//! rendering back end and the dataset loader shared by the front ends.

pub mod dataset;
pub mod render;

pub use rail_chart as chart;
pub use rail_config as config;
pub use rail_core::{constants, format, time, units};
pub use rail_export as export;
pub use rail_intervals as intervals;
pub use rail_store as store;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
