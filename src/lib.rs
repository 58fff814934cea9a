//! Stellar Lattice - a star's life cycle on a 2-D nucleon lattice
//!
//! Core modules:
//! - `sim`: Deterministic simulation (transport, ignition, fusion)
//! - `renderer`: PNG charts for density fields and run history
//! - `journal`: Per-iteration composition record
//! - `settings`: Run configuration
//! - `evolution`: Drives a full run from first lattice to fuel exhaustion

pub mod error;
pub mod evolution;
pub mod journal;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SimResult, StellarError};
pub use evolution::{Evolution, Outcome, RunSummary};
pub use settings::Settings;

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Smallest supported lattice side
    pub const MIN_DIM: usize = 10;
    /// Default lattice side
    pub const DEFAULT_DIM: usize = 20;

    /// Core temperature (units of 10^6 K) that ignites the core
    pub const IGNITION_TEMPERATURE: f64 = 7.0;
    /// Core radius around the centre of mass (cells)
    pub const CORE_RADIUS: f64 = 2.0;
    /// Converts mean core mass number into a temperature estimate
    pub const CORE_TEMPERATURE_SCALE: f64 = 4.0;

    /// Gravity damping per unit of accumulated fusion energy
    pub const ENERGY_DAMPING: f64 = 0.99;
    /// Fraction of residual cell energy added to every Q-value
    pub const ENERGY_BOOST: f64 = 0.01;

    /// Run ends once H + He drop below this percentage
    pub const FUEL_CUTOFF_PERCENT: f64 = 5.0;
    /// Proton counts tracked in the composition history (H, He, C, N, O)
    pub const WATCH_LIST: [u32; 5] = [1, 2, 6, 7, 8];

    /// Initial star radius as a fraction of the lattice side
    pub const STAR_RADIUS_FRACTION: f64 = 0.35;

    /// Safety cap on iterations when none is configured
    pub const DEFAULT_MAX_ITERATIONS: u32 = 10_000;
}

/// Lattice coordinate (row, column)
pub type Cell = (usize, usize);

/// Convert a lattice cell to a continuous point (x = row, y = column)
#[inline]
pub fn cell_to_point(cell: Cell) -> DVec2 {
    DVec2::new(cell.0 as f64, cell.1 as f64)
}

/// Euclidean distance from a cell to a continuous point
#[inline]
pub fn distance_to(cell: Cell, point: DVec2) -> f64 {
    cell_to_point(cell).distance(point)
}
