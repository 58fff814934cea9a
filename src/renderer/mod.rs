//! PNG rendering module
//!
//! Density heat maps and line charts drawn straight into RGB rasters.

pub mod canvas;
pub mod charts;

pub use canvas::{Canvas, heat_color};
pub use charts::{plot_composition, plot_density, plot_profile, plot_rate};
