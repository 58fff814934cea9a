//! Deterministic simulation module
//!
//! All stellar physics lives here. This module must be pure and deterministic:
//! - Seeded randomness only, drawn through `RandomSource`
//! - Stable iteration order (row-major positions, catalog-ordered isotopes)
//! - No rendering or filesystem dependencies

pub mod composition;
pub mod field;
pub mod fusion;
pub mod grid;
pub mod isotopes;
pub mod nuclide;
pub mod random;
pub mod state;
pub mod tick;

pub use composition::{CompositionHistory, CompositionRow, Snapshot, composition};
pub use field::{CoreRegion, DensityField, centre_of_mass, core, force};
pub use fusion::{Candidate, Reaction, candidates, cumulative_weights, resolve};
pub use grid::Grid;
pub use isotopes::{Isotope, IsotopeTable};
pub use nuclide::Nuclide;
pub use random::{RandomSource, SeededRng};
pub use state::{EnergyField, IgnitionGate, StarState};
pub use tick::{TickReport, damping_factor, suppression_factor, tick, transport};
